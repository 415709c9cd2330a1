use data_encoding::BASE32_NOPAD;
use rand::rngs::OsRng;
use rand::RngCore;

// Generate a 20 byte random base32 string
pub fn generate_secret() -> String {
    let mut dest = [0u8; 20];
    OsRng.fill_bytes(&mut dest);
    BASE32_NOPAD.encode(&dest)
}

pub fn is_service_name(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(String::from("name must not be empty"));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(String::from("name must not contain spaces"));
    }
    Ok(())
}

pub fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}
