//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Seed input (`?seed=<int>` on web, `BRICKRUN_SEED` natively)

/// Query parameter carrying the level seed
pub const SEED_PARAM: &str = "seed";

/// Environment variable read by native builds
pub const SEED_ENV: &str = "BRICKRUN_SEED";

/// Parse a seed the way the browser's `parseInt` reads it.
///
/// Leading whitespace and sign are accepted, parsing stops at the first
/// non-digit, and the value wraps into 32 bits. Returns `None` when there are
/// no leading digits.
pub fn parse_seed(raw: &str) -> Option<u32> {
    let raw = raw.trim_start();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Folding mod 2^32 per digit keeps arbitrarily long runs in range.
    let value = digits[..end]
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(10).wrapping_add(u32::from(b - b'0')));
    Some(if negative { value.wrapping_neg() } else { value })
}

/// Extract the seed from a URL query string (with or without the leading `?`)
///
/// Keys and values are form-decoded (`+` and `%XX` escapes) the same way the
/// browser's `URLSearchParams` reads them.
pub fn seed_from_query(search: &str) -> Option<u32> {
    let search = search.strip_prefix('?').unwrap_or(search);
    let raw = search
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .map(|(key, value)| (form_decode(key), value))
        .find(|(key, _)| key == SEED_PARAM)
        .map(|(_, value)| form_decode(value))?;

    seed_from_param(&raw)
}

fn seed_from_param(raw: &str) -> Option<u32> {
    let seed = parse_seed(raw);
    if seed.is_none() {
        log::warn!("Ignoring invalid seed {:?}, using random levels", raw);
    }
    seed
}

/// Decode one `application/x-www-form-urlencoded` component.
///
/// Malformed escapes pass through literally and invalid UTF-8 is replaced.
fn form_decode(component: &str) -> String {
    let bytes = component.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 2;
                    }
                    _ => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Seed from the page URL (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn seed_input() -> Option<u32> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    let raw = params.get(SEED_PARAM)?;
    seed_from_param(&raw)
}

/// Seed from the environment (native)
#[cfg(not(target_arch = "wasm32"))]
pub fn seed_input() -> Option<u32> {
    let raw = std::env::var(SEED_ENV).ok()?;
    let seed = parse_seed(&raw);
    if seed.is_none() {
        log::warn!("Ignoring invalid {}={:?}", SEED_ENV, raw);
    }
    seed
}
