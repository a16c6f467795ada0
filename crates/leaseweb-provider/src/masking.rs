//! Secret masking for log output
//!
//! A [`SecretMask`] holds the literal secrets known to the process. Wrapping
//! the subscriber's writer in a [`MaskingMakeWriter`] makes every formatted
//! record pass through the mask before it is written, so a registered secret
//! is replaced wherever it occurs in the record: message, any field, or the
//! span context. Field names do not matter.
//!
//! # Example
//!
//! ```rust
//! use leaseweb_provider::masking::{SecretMask, MASK};
//!
//! let mask = SecretMask::new();
//! mask.add("s3cr3t");
//! assert_eq!(mask.mask("token=s3cr3t"), format!("token={MASK}"));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing_subscriber::fmt::MakeWriter;

/// Replacement written in place of a secret
pub const MASK: &str = "***";

static GLOBAL_MASK: OnceLock<SecretMask> = OnceLock::new();

/// Process-wide set of secret literals
///
/// Cloning shares the underlying set, so a mask handed to the logging
/// bootstrap sees secrets registered later through any clone.
#[derive(Clone, Default)]
pub struct SecretMask {
    secrets: Arc<RwLock<Vec<String>>>,
}

impl SecretMask {
    /// A mask of its own, shared only with its clones
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide mask
    ///
    /// [`crate::telemetry::init`] and [`crate::LeasewebProvider::new`] both
    /// use it, so secrets registered during configure are masked by the
    /// installed subscriber.
    pub fn global() -> &'static SecretMask {
        GLOBAL_MASK.get_or_init(SecretMask::new)
    }

    /// Register a secret literal
    ///
    /// Empty strings are ignored. The escaped spellings produced by the JSON
    /// formatter and by `Debug` (used for string fields in text records) are
    /// registered too when they differ.
    pub fn add(&self, secret: &str) {
        if secret.is_empty() {
            return;
        }

        let mut spellings = vec![secret.to_string()];
        let debug_quoted = format!("{secret:?}");
        let quoted = [serde_json::to_string(secret).ok(), Some(debug_quoted)];
        for quoted in quoted.into_iter().flatten() {
            let escaped = &quoted[1..quoted.len() - 1];
            if !spellings.iter().any(|known| known == escaped) {
                spellings.push(escaped.to_string());
            }
        }

        let mut secrets = self.secrets.write().unwrap_or_else(PoisonError::into_inner);
        for spelling in spellings {
            if !secrets.contains(&spelling) {
                secrets.push(spelling);
            }
        }
        // Longest first so a secret that contains another is masked whole.
        secrets.sort_by(|a, b| b.len().cmp(&a.len()));
    }

    /// Replace every registered secret in `text`
    pub fn mask<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let secrets = self.secrets.read().unwrap_or_else(PoisonError::into_inner);
        let mut masked = Cow::Borrowed(text);
        for secret in secrets.iter() {
            if masked.contains(secret.as_str()) {
                masked = Cow::Owned(masked.replace(secret.as_str(), MASK));
            }
        }
        masked
    }

    /// Number of registered spellings
    pub fn len(&self) -> usize {
        self.secrets.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for SecretMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretMask")
            .field("secrets", &self.len())
            .finish()
    }
}

/// [`MakeWriter`] that masks secrets in every record
#[derive(Debug, Clone)]
pub struct MaskingMakeWriter<M> {
    inner: M,
    mask: SecretMask,
}

impl<M> MaskingMakeWriter<M> {
    pub fn new(inner: M, mask: SecretMask) -> Self {
        Self { inner, mask }
    }
}

impl<'a, M> MakeWriter<'a> for MaskingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = MaskingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        MaskingWriter::new(self.inner.make_writer(), self.mask.clone())
    }
}

/// Writer that buffers one record and masks it before forwarding
///
/// The buffered record is flushed on [`Write::flush`] or when the writer is
/// dropped, which the formatter does once per record.
pub struct MaskingWriter<W: Write> {
    inner: W,
    mask: SecretMask,
    buffer: Vec<u8>,
}

impl<W: Write> MaskingWriter<W> {
    pub fn new(inner: W, mask: SecretMask) -> Self {
        Self {
            inner,
            mask,
            buffer: Vec::new(),
        }
    }

    fn write_buffered(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let buffer = std::mem::take(&mut self.buffer);
        let text = String::from_utf8_lossy(&buffer);
        self.inner.write_all(self.mask.mask(&text).as_bytes())
    }
}

impl<W: Write> Write for MaskingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.write_buffered()?;
        self.inner.flush()
    }
}

impl<W: Write> Drop for MaskingWriter<W> {
    fn drop(&mut self) {
        // Errors cannot be reported from drop; the record is lost either way.
        let _ = self.flush();
    }
}
