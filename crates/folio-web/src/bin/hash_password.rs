//! Prints an argon2 hash for `FOLIO_ADMIN_PASSWORD_HASH`.

use std::io::{self, Write};

fn main() -> anyhow::Result<()> {
    eprint!("Enter admin password: ");
    io::stderr().flush()?;

    let mut password = String::new();
    io::stdin().read_line(&mut password)?;
    let password = password.trim();

    if password.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }

    println!("{}", folio_web::auth::password::hash_password(password)?);
    Ok(())
}
