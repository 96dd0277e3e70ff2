use tokio::io::{AsyncRead, AsyncWrite};

/// Any bidirectional byte stream a connection can run over.
///
/// Implemented for every `AsyncRead + AsyncWrite` type, so TCP streams,
/// `tokio::io::duplex` pipes and test doubles all qualify.
pub trait DeviceIo: AsyncRead + AsyncWrite + Send + Unpin + 'static {}

impl<T> DeviceIo for T where T: AsyncRead + AsyncWrite + Send + Unpin + 'static {}

/// Type-erased read half.
pub type BoxedReader = Box<dyn AsyncRead + Send + Unpin>;

/// Type-erased write half.
pub type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Split a stream into independently owned, boxed halves.
pub fn split<T: DeviceIo>(io: T) -> (BoxedReader, BoxedWriter) {
    let (read, write) = tokio::io::split(io);
    (Box::new(read), Box::new(write))
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    use super::*;

    #[tokio::test]
    async fn split_halves_carry_bytes_both_ways() {
        let (left, right) = tokio::io::duplex(64);
        let (mut left_read, mut left_write) = split(left);
        let (mut right_read, mut right_write) = split(right);

        left_write.write_all(b"ping").await.unwrap();
        let mut buf = [0u8; 4];
        right_read.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"ping");

        right_write.write_all(b"pong").await.unwrap();
        left_read.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"pong");
    }
}
