//! SIM command seam and response buffer handling.

use bytes::Buf;
use eapsim_common::{base64_decode, AppType, AuthType, OctetString};

use crate::error::{AuthError, AuthResult};

/// Responses of this many base64 characters or fewer carry no usable data.
pub const MIN_RESPONSE_LEN: usize = 4;

/// Executes the AUTHENTICATE command on the UICC.
///
/// `challenge` is the base64 encoded command data. The return value is the
/// base64 encoded response, or `None` when the card or modem failed.
/// Calls for one subscription must not overlap.
pub trait SimCommand {
    /// Runs one authentication command.
    fn icc_authentication(
        &self,
        app_type: AppType,
        auth_type: AuthType,
        challenge: &str,
    ) -> Option<String>;
}

/// Validates and decodes the base64 response returned by the SIM.
pub fn response_bytes(response: Option<&str>) -> AuthResult<Vec<u8>> {
    let response = response.ok_or(AuthError::MissingResponse)?;
    if response.len() <= MIN_RESPONSE_LEN {
        return Err(AuthError::ResponseTooShort {
            len: response.len(),
        });
    }
    base64_decode(response).map_err(|e| AuthError::MalformedResponse(e.to_string()))
}

/// Reads a field preceded by a signed one-byte length.
pub(crate) fn read_length_prefixed<B: Buf>(
    buf: &mut B,
    field: &'static str,
) -> AuthResult<OctetString> {
    if !buf.has_remaining() {
        return Err(AuthError::BufferTooShort {
            field,
            expected: 1,
            actual: 0,
        });
    }
    let value = buf.get_i8();
    let len = usize::try_from(value).map_err(|_| AuthError::NegativeLength { field, value })?;
    if buf.remaining() < len {
        return Err(AuthError::BufferTooShort {
            field,
            expected: len,
            actual: buf.remaining(),
        });
    }
    let mut data = vec![0u8; len];
    buf.copy_to_slice(&mut data);
    Ok(OctetString::from_vec(data))
}
