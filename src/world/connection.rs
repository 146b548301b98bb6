//! Minecraft Pi API client.
//!
//! The API is line based: each command is `name(arg,arg,...)\n` and queries
//! answer with a single line.

use crate::config::WorldConfig;
use crate::error::{Result, SpaceCraftError};
use crate::world::{Block, BlockPos, World};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use tracing::{debug, info, trace};

/// A live connection to a Minecraft Pi game.
pub struct McpiConnection {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl McpiConnection {
    /// Connect to the game described by `config`.
    pub fn connect(config: &WorldConfig) -> Result<Self> {
        let address = config.address();
        let stream = TcpStream::connect(&address).map_err(|e| {
            SpaceCraftError::connection_error(format!("Failed to connect to {}: {}", address, e))
        })?;
        stream.set_nodelay(true)?;
        info!("Connected to Minecraft at {}", address);

        Self::from_stream(stream)
    }

    /// Wrap an already connected stream.
    pub fn from_stream(stream: TcpStream) -> Result<Self> {
        let writer = stream.try_clone()?;
        Ok(Self {
            reader: BufReader::new(stream),
            writer,
        })
    }

    /// Send a command that has no reply.
    fn send(&mut self, command: &str, args: &str) -> Result<()> {
        let line = format!("{}({})\n", command, sanitize(args));
        trace!("-> {}", line.trim_end());
        self.writer.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Send a command and read its one-line reply.
    fn query(&mut self, command: &str, args: &str) -> Result<String> {
        self.send(command, args)?;
        self.writer.flush()?;

        let mut reply = String::new();
        let read = self.reader.read_line(&mut reply)?;
        if read == 0 {
            return Err(SpaceCraftError::connection_error(format!(
                "Connection closed while waiting for {}",
                command
            )));
        }

        let reply = reply.trim_end().to_string();
        trace!("<- {}", reply);
        if reply == "Fail" {
            return Err(SpaceCraftError::protocol_error(format!(
                "{}({}) failed",
                command, args
            )));
        }
        Ok(reply)
    }
}

impl World for McpiConnection {
    fn set_block(&mut self, pos: BlockPos, block: Block) -> Result<()> {
        self.send("world.setBlock", &format!("{},{}", pos, block))
    }

    fn set_blocks(&mut self, from: BlockPos, to: BlockPos, block: Block) -> Result<()> {
        self.send("world.setBlocks", &format!("{},{},{}", from, to, block))
    }

    fn get_block(&mut self, pos: BlockPos) -> Result<Block> {
        let reply = self.query("world.getBlockWithData", &pos.to_string())?;
        let values = parse_ints(&reply)?;
        match values.as_slice() {
            [id, data] => Ok(Block {
                id: to_u8(*id, &reply)?,
                data: to_u8(*data, &reply)?,
            }),
            _ => Err(SpaceCraftError::protocol_error(format!(
                "Expected id,data but got {:?}",
                reply
            ))),
        }
    }

    fn get_height(&mut self, x: i32, z: i32) -> Result<i32> {
        let reply = self.query("world.getHeight", &format!("{},{}", x, z))?;
        match parse_ints(&reply)?.as_slice() {
            [y] => Ok(*y),
            _ => Err(SpaceCraftError::protocol_error(format!(
                "Expected a height but got {:?}",
                reply
            ))),
        }
    }

    fn player_tile_pos(&mut self) -> Result<BlockPos> {
        let reply = self.query("player.getTile", "")?;
        match parse_ints(&reply)?.as_slice() {
            [x, y, z] => Ok(BlockPos::new(*x, *y, *z)),
            _ => Err(SpaceCraftError::protocol_error(format!(
                "Expected x,y,z but got {:?}",
                reply
            ))),
        }
    }

    fn post_to_chat(&mut self, message: &str) -> Result<()> {
        debug!("Chat: {}", message);
        self.send("chat.post", message)
    }
}

/// Newlines would end the command early.
fn sanitize(args: &str) -> String {
    args.replace(['\n', '\r'], " ")
}

/// Parse a comma separated reply. The game sends floats for some positions,
/// which are truncated towards negative infinity like block coordinates.
fn parse_ints(reply: &str) -> Result<Vec<i32>> {
    reply
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<i32>().or_else(|_| {
                part.parse::<f64>()
                    .map(|f| f.floor() as i32)
                    .map_err(|_| {
                        SpaceCraftError::protocol_error(format!("Bad number {:?} in reply", part))
                    })
            })
        })
        .collect()
}

fn to_u8(value: i32, reply: &str) -> Result<u8> {
    u8::try_from(value)
        .map_err(|_| SpaceCraftError::protocol_error(format!("Block value out of range in {:?}", reply)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::thread;

    /// Accept one client, answer each query line with the next canned reply
    /// and return everything the client sent.
    fn fake_game(replies: Vec<&'static str>) -> (WorldConfig, thread::JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut writer = stream.try_clone().unwrap();
            let reader = BufReader::new(stream);
            let mut replies = replies.into_iter();
            let mut received = Vec::new();

            for line in reader.lines() {
                let line = line.unwrap();
                let is_query = line.starts_with("world.get") || line.starts_with("player.get");
                received.push(line);
                if is_query {
                    if let Some(reply) = replies.next() {
                        writer.write_all(format!("{}\n", reply).as_bytes()).unwrap();
                    }
                }
            }
            received
        });

        (WorldConfig::new("127.0.0.1", port), handle)
    }

    #[test]
    fn test_commands_on_the_wire() {
        let (config, server) = fake_game(vec!["3,4,-5", "12", "35,14"]);
        {
            let mut mc = McpiConnection::connect(&config).unwrap();
            mc.set_block(BlockPos::new(1, 2, 3), Block::wool(14)).unwrap();
            mc.set_blocks(BlockPos::new(0, 0, 0), BlockPos::new(2, 2, 2), Block::AIR)
                .unwrap();
            assert_eq!(mc.player_tile_pos().unwrap(), BlockPos::new(3, 4, -5));
            assert_eq!(mc.get_height(3, -5).unwrap(), 12);
            assert_eq!(mc.get_block(BlockPos::new(1, 2, 3)).unwrap(), Block::wool(14));
            mc.post_to_chat("lift\noff").unwrap();
        }

        let received = server.join().unwrap();
        assert_eq!(received[0], "world.setBlock(1,2,3,35,14)");
        assert_eq!(received[1], "world.setBlocks(0,0,0,2,2,2,0,0)");
        assert_eq!(received[2], "player.getTile()");
        assert_eq!(received[3], "world.getHeight(3,-5)");
        assert_eq!(received[4], "world.getBlockWithData(1,2,3)");
        assert_eq!(received[5], "chat.post(lift off)");
    }

    #[test]
    fn test_fail_reply_is_protocol_error() {
        let (config, server) = fake_game(vec!["Fail"]);
        {
            let mut mc = McpiConnection::connect(&config).unwrap();
            let err = mc.get_height(0, 0).unwrap_err();
            assert!(matches!(err, SpaceCraftError::Protocol(_)));
        }
        server.join().unwrap();
    }

    #[test]
    fn test_parse_float_reply() {
        assert_eq!(parse_ints("1.5,-0.5,3").unwrap(), vec![1, -1, 3]);
        assert!(parse_ints("x").is_err());
    }

    #[test]
    fn test_connect_refused() {
        // Bind then drop to get a port nothing listens on.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let result = McpiConnection::connect(&WorldConfig::new("127.0.0.1", port));
        assert!(matches!(result, Err(SpaceCraftError::Connection(_))));
    }
}
