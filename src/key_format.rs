use std::fmt;

/// Marker whose presence means the key is already PEM-framed.
pub const PEM_BEGIN_MARKER: &str = "-----BEGIN";

const PEM_LINE_WIDTH: usize = 64;

/// Which half of a key pair a piece of key material is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Public,
    Private,
}

impl KeyKind {
    /// Label used between `BEGIN` and `KEY` in the PEM frame
    pub fn pem_label(self) -> &'static str {
        match self {
            KeyKind::Public => "PUBLIC",
            KeyKind::Private => "PRIVATE",
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Public => write!(f, "public"),
            KeyKind::Private => write!(f, "private"),
        }
    }
}

/// Wraps a bare base64 key body in a PEM frame of the given kind.
///
/// Keys that already carry a `-----BEGIN` marker come back untouched, so the
/// function is idempotent. Nothing is validated here; a malformed body only
/// surfaces once the frame is handed to the key parser.
pub fn format_as_pem(key: &str, kind: KeyKind) -> String {
    if key.contains(PEM_BEGIN_MARKER) {
        return key.to_string();
    }

    let label = kind.pem_label();
    let body = wrap_lines(key).join("\n");

    format!("-----BEGIN {label} KEY-----\n{body}\n-----END {label} KEY-----")
}

// Line terminators split runs; they never count toward the 64 characters.
fn wrap_lines(key: &str) -> Vec<String> {
    key.split(['\n', '\r', '\u{2028}', '\u{2029}'])
        .filter(|line| !line.is_empty())
        .flat_map(|line| {
            let chars: Vec<char> = line.chars().collect();
            chars
                .chunks(PEM_LINE_WIDTH)
                .map(|run| run.iter().collect::<String>())
                .collect::<Vec<_>>()
        })
        .collect()
}
