use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

/// Argon2id hash of a throwaway password, using the same parameters as
/// [`hash_password`]. Logins for unknown usernames are checked against it so
/// they cost as much as a wrong password for a real account.
const DECOY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$zM360h38VTkP4b1dt9JXuw$MhUDCfRMz8BSJrCG3nxSeLnWXJZrtZksPy3mhXZn8Bg";

fn parse_hash(hash: &str) -> anyhow::Result<PasswordHash<'_>> {
    PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid admin password hash: {e}"))
}

/// Fails unless `hash` is a PHC string the verifier can use.
pub fn check_hash(hash: &str) -> anyhow::Result<()> {
    parse_hash(hash).map(|_| ())
}

/// Checks a login attempt against the stored hash of the account, if any.
///
/// `None` means the username is unknown; the password is still run through
/// argon2 and the result is always `false`. An unusable stored hash is an
/// error.
pub fn verify_login(stored_hash: Option<&str>, password: &str) -> anyhow::Result<bool> {
    let (hash, known) = match stored_hash {
        Some(hash) => (hash, true),
        None => (DECOY_HASH, false),
    };
    let parsed = parse_hash(hash)?;
    let matches = Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok();

    Ok(known && matches)
}

/// Hashes an admin password into a PHC string for the config file.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))
}
