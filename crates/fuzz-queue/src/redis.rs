//! Redis list transport.
//!
//! Speaks just enough RESP2 to drive `RPUSH` and `LPOP` over a single
//! connection. Requests are arrays of bulk strings; replies are parsed
//! into [`Reply`].

use crate::error::QueueError;
use crate::Queue;
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufStream};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tracing::debug;

/// How long to wait for the TCP connection before giving up.
pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(2500);

/// A parsed RESP reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Simple(String),
    Error(String),
    Integer(i64),
    Bulk(Option<Vec<u8>>),
    Array(Option<Vec<Reply>>),
}

/// Queue backed by Redis lists.
#[derive(Debug)]
pub struct RedisQueue {
    endpoint: String,
    conn: Mutex<BufStream<TcpStream>>,
}

impl RedisQueue {
    /// Open a connection to `host:port`.
    pub async fn connect(host: &str, port: u16) -> Result<Self, QueueError> {
        let endpoint = format!("{host}:{port}");
        let stream = match tokio::time::timeout(CONNECT_TIMEOUT, TcpStream::connect((host, port))).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                return Err(QueueError::Connect {
                    endpoint,
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                return Err(QueueError::Connect {
                    endpoint,
                    reason: format!("timed out after {CONNECT_TIMEOUT:?}"),
                })
            }
        };
        stream.set_nodelay(true)?;
        debug!("Connected to Redis queue at {endpoint}");

        Ok(Self {
            endpoint,
            conn: Mutex::new(BufStream::new(stream)),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request(&self, args: &[&[u8]]) -> Result<Reply, QueueError> {
        let mut conn = self.conn.lock().await;
        conn.write_all(&encode_request(args)).await?;
        conn.flush().await?;
        match read_reply(&mut *conn).await? {
            Reply::Error(message) => Err(QueueError::Protocol(message)),
            reply => Ok(reply),
        }
    }
}

#[async_trait]
impl Queue for RedisQueue {
    async fn push(&self, name: &str, payload: String) -> Result<(), QueueError> {
        match self
            .request(&[b"RPUSH", name.as_bytes(), payload.as_bytes()])
            .await?
        {
            Reply::Integer(_) => Ok(()),
            other => Err(QueueError::Protocol(format!(
                "unexpected RPUSH reply: {other:?}"
            ))),
        }
    }

    async fn pop(&self, name: &str) -> Result<Option<String>, QueueError> {
        match self.request(&[b"LPOP", name.as_bytes()]).await? {
            Reply::Bulk(None) | Reply::Array(None) => Ok(None),
            Reply::Bulk(Some(bytes)) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| QueueError::Protocol(format!("non UTF-8 payload: {e}"))),
            other => Err(QueueError::Protocol(format!(
                "unexpected LPOP reply: {other:?}"
            ))),
        }
    }
}

/// Build a RESP array of bulk strings.
pub fn encode_request(args: &[&[u8]]) -> Vec<u8> {
    let mut out = format!("*{}\r\n", args.len()).into_bytes();
    for arg in args {
        out.extend_from_slice(format!("${}\r\n", arg.len()).as_bytes());
        out.extend_from_slice(arg);
        out.extend_from_slice(b"\r\n");
    }
    out
}

/// Read one complete reply from `reader`.
pub async fn read_reply<R>(reader: &mut R) -> Result<Reply, QueueError>
where
    R: AsyncBufRead + Unpin + Send,
{
    // Arrays nest, so walk them with an explicit stack instead of recursing
    // through an async fn.
    let mut stack: Vec<(usize, Vec<Reply>)> = Vec::new();
    loop {
        let line = read_line(reader).await?;
        let mut chars = line.chars();
        let kind = chars.next();
        let rest = chars.as_str();
        let mut reply = match kind {
            Some('+') => Reply::Simple(rest.to_string()),
            Some('-') => Reply::Error(rest.to_string()),
            Some(':') => Reply::Integer(parse_int(rest)?),
            Some('$') => {
                let len = parse_int(rest)?;
                if len < 0 {
                    Reply::Bulk(None)
                } else {
                    let mut buf = vec![0u8; len as usize + 2];
                    reader.read_exact(&mut buf).await?;
                    if !buf.ends_with(b"\r\n") {
                        return Err(QueueError::Protocol("bulk string missing CRLF".into()));
                    }
                    buf.truncate(len as usize);
                    Reply::Bulk(Some(buf))
                }
            }
            Some('*') => {
                let len = parse_int(rest)?;
                if len < 0 {
                    Reply::Array(None)
                } else if len == 0 {
                    Reply::Array(Some(Vec::new()))
                } else {
                    stack.push((len as usize, Vec::with_capacity(len as usize)));
                    continue;
                }
            }
            other => {
                return Err(QueueError::Protocol(format!(
                    "unknown reply type {other:?}"
                )))
            }
        };

        loop {
            let Some((expected, items)) = stack.last_mut() else {
                return Ok(reply);
            };
            items.push(reply);
            if items.len() < *expected {
                break;
            }
            let (_, items) = stack.pop().unwrap_or_default();
            reply = Reply::Array(Some(items));
        }
    }
}

async fn read_line<R>(reader: &mut R) -> Result<String, QueueError>
where
    R: AsyncBufRead + Unpin + Send,
{
    let mut buf = Vec::new();
    let n = reader.read_until(b'\n', &mut buf).await?;
    if n == 0 {
        return Err(QueueError::Protocol("connection closed".into()));
    }
    if !buf.ends_with(b"\r\n") || buf.len() < 3 {
        return Err(QueueError::Protocol("malformed reply line".into()));
    }
    buf.truncate(buf.len() - 2);
    String::from_utf8(buf).map_err(|e| QueueError::Protocol(e.to_string()))
}

fn parse_int(s: &str) -> Result<i64, QueueError> {
    s.parse()
        .map_err(|_| QueueError::Protocol(format!("invalid integer in reply: {s:?}")))
}
