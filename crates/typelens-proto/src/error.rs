/// Malformed wire data.
///
/// Fatal to the single item being decoded; batch decoders drop the item and
/// keep going.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unknown type kind `{kind}`")]
    UnknownKind { kind: String },

    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("invalid field `{field}`: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl DecodeError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        DecodeError::InvalidField {
            field,
            message: message.into(),
        }
    }

    pub(crate) fn from_serde(err: &serde_json::Error) -> Self {
        DecodeError::Malformed(sanitize_serde_json_error(err))
    }
}

/// Render a `serde_json` error without echoing string payload content.
///
/// Double-quoted substrings are redacted; line/column info and schema field
/// names are kept so the message stays actionable.
#[must_use]
pub fn sanitize_serde_json_error(err: &serde_json::Error) -> String {
    sanitize_json_error_message(&err.to_string())
}

#[must_use]
pub fn sanitize_json_error_message(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    let mut rest = message;
    while let Some(start) = rest.find('"') {
        out.push_str(&rest[..start + 1]);
        rest = &rest[start + 1..];

        let bytes = rest.as_bytes();
        let mut end = None;
        for (idx, &b) in bytes.iter().enumerate() {
            if b != b'"' {
                continue;
            }
            // Quotes preceded by an odd number of backslashes are escaped.
            let backslashes = bytes[..idx].iter().rev().take_while(|&&c| c == b'\\').count();
            if backslashes % 2 == 0 {
                end = Some(idx);
                break;
            }
        }

        let Some(end) = end else {
            out.push_str("<redacted>");
            rest = "";
            break;
        };
        out.push_str("<redacted>\"");
        rest = &rest[end + 1..];
    }
    out.push_str(rest);

    // `unknown variant `x`` / `unknown field `x`` echo user keys.
    for pattern in ["unknown field `", "unknown variant `"] {
        if let Some(pos) = out.find(pattern) {
            let start = pos + pattern.len();
            if let Some(len) = out[start..].find('`') {
                out.replace_range(start..start + len, "<redacted>");
            }
        }
    }
    out
}
