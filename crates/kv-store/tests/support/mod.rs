//! A tiny RESP responder answering `PING` and replaying scripted `SCAN` pages.

use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

type Pages = HashMap<u64, (u64, Vec<String>)>;

pub struct ScriptedRedis {
    pub addr: SocketAddr,
    commands: Arc<Mutex<Vec<Vec<String>>>>,
}

impl ScriptedRedis {
    /// `pages` maps the cursor a `SCAN` asks for to `(next cursor, keys)`.
    pub async fn start(pages: Vec<(u64, u64, Vec<&str>)>) -> Self {
        let pages: Arc<Pages> = Arc::new(
            pages
                .into_iter()
                .map(|(cursor, next, keys)| {
                    (cursor, (next, keys.into_iter().map(String::from).collect()))
                })
                .collect(),
        );
        let commands = Arc::new(Mutex::new(Vec::new()));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let recorded = commands.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let pages = pages.clone();
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    let _ = serve(stream, pages, recorded).await;
                });
            }
        });

        Self { addr, commands }
    }

    pub fn url(&self) -> String {
        format!("redis://{}", self.addr)
    }

    /// Every recorded command whose name is `name`, arguments included.
    pub fn commands_named(&self, name: &str) -> Vec<Vec<String>> {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .filter(|command| command.first().is_some_and(|n| n.eq_ignore_ascii_case(name)))
            .cloned()
            .collect()
    }
}

async fn serve(
    stream: TcpStream,
    pages: Arc<Pages>,
    commands: Arc<Mutex<Vec<Vec<String>>>>,
) -> io::Result<()> {
    let (read, mut write) = stream.into_split();
    let mut reader = BufReader::new(read);
    while let Some(command) = read_command(&mut reader).await? {
        let reply = respond(&command, &pages);
        commands.lock().unwrap().push(command);
        write.write_all(reply.as_bytes()).await?;
    }
    Ok(())
}

async fn read_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line).await? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches("\r\n").to_string()))
}

fn header(line: &str, marker: char) -> io::Result<usize> {
    line.strip_prefix(marker)
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, line.to_string()))
}

async fn read_command<R: AsyncBufRead + Unpin>(reader: &mut R) -> io::Result<Option<Vec<String>>> {
    let Some(line) = read_line(reader).await? else {
        return Ok(None);
    };
    let count = header(&line, '*')?;
    let mut parts = Vec::with_capacity(count);
    for _ in 0..count {
        let line = read_line(reader)
            .await?
            .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))?;
        let len = header(&line, '$')?;
        let mut buf = vec![0; len + 2];
        reader.read_exact(&mut buf).await?;
        buf.truncate(len);
        parts.push(String::from_utf8_lossy(&buf).into_owned());
    }
    Ok(Some(parts))
}

fn bulk(value: &str) -> String {
    format!("${}\r\n{}\r\n", value.len(), value)
}

fn respond(command: &[String], pages: &Pages) -> String {
    let name = command.first().map(|n| n.to_ascii_uppercase()).unwrap_or_default();
    match name.as_str() {
        "PING" => "+PONG\r\n".to_string(),
        "CLIENT" => "+OK\r\n".to_string(),
        "SCAN" => {
            let page = command
                .get(1)
                .and_then(|cursor| cursor.parse::<u64>().ok())
                .and_then(|cursor| pages.get(&cursor));
            match page {
                Some((next, keys)) => {
                    let mut reply = format!("*2\r\n{}*{}\r\n", bulk(&next.to_string()), keys.len());
                    for key in keys {
                        reply.push_str(&bulk(key));
                    }
                    reply
                }
                None => "-ERR unscripted cursor\r\n".to_string(),
            }
        }
        other => format!("-ERR unknown command '{}'\r\n", other.to_lowercase()),
    }
}
