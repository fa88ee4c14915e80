//! Content hashing

use sha2::{Digest, Sha256};
use tokio::io::{AsyncRead, AsyncReadExt};

const HASH_BUFFER_SIZE: usize = 64 * 1024;

/// Stream everything from `reader` through SHA-256 and return the lowercase
/// hex digest (64 characters).
pub async fn hash_reader<R>(reader: &mut R) -> std::io::Result<String>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; HASH_BUFFER_SIZE];

    loop {
        let read = reader.read(&mut buffer).await?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Stored name for content with the given digest: `<digest><extension>`
pub fn content_addressed_name(digest: &str, extension: &str) -> String {
    format!("{}{}", digest, extension)
}
