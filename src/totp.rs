use std::time::SystemTime;

use crate::error::Result;
use crate::hotp::get_hotp;

// TOTP https://datatracker.ietf.org/doc/html/rfc6238
// HOTP over a time-based moving factor, T0 = 0 and X = 30 seconds

pub const TIME_STEP: u64 = 30;

pub trait GetTime {
    fn get_now(&self) -> SystemTime;
}

pub struct Clock {}

impl Clock {
    pub fn new() -> Self {
        Clock {}
    }
}

impl GetTime for Clock {
    fn get_now(&self) -> SystemTime {
        SystemTime::now()
    }
}

// Instants before the epoch fall into the first window.
pub fn get_totp_moving_factor(now: SystemTime) -> u64 {
    let secs = now
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);
    secs / TIME_STEP
}

pub fn get_totp(secret: &[u8], now: SystemTime, digits: u32) -> Result<u32> {
    get_hotp(secret, get_totp_moving_factor(now), digits)
}

/// Checks `code` against the windows `window` steps either side of `now`,
/// returning the matching moving factor.
pub fn validate_totp(
    secret: &[u8],
    now: SystemTime,
    digits: u32,
    code: u32,
    window: u64,
) -> Result<Option<u64>> {
    let moving_factor = get_totp_moving_factor(now);
    let first = moving_factor.saturating_sub(window);
    let last = moving_factor.saturating_add(window);

    for mf in first..=last {
        if get_hotp(secret, mf, digits)? == code {
            return Ok(Some(mf));
        }
    }

    Ok(None)
}
