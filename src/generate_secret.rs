// generate_secret.rs
// Utility to generate a signing secret for access tokens

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{rngs::OsRng, RngCore};

/// 512 bits, enough for HS512
const SECRET_BYTES: usize = 64;

fn generate_secret() -> String {
    let mut secret = [0u8; SECRET_BYTES];
    OsRng.fill_bytes(&mut secret);
    URL_SAFE_NO_PAD.encode(secret)
}

fn main() {
    println!("Generating new token signing secret...\n");

    let secret = generate_secret();

    println!("✅ Secret generated successfully!\n");
    println!("Add this to your .env file:");
    println!("─────────────────────────────────────────────────");
    println!("SECRET_KEY={}", secret);
    println!("─────────────────────────────────────────────────");
    println!("\n⚠️  IMPORTANT:");
    println!("  • Keep this secret out of version control");
    println!("  • Rotating it invalidates every issued access token");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_is_random_and_url_safe() {
        let a = generate_secret();
        let b = generate_secret();

        assert_ne!(a, b);
        assert_eq!(URL_SAFE_NO_PAD.decode(&a).unwrap().len(), SECRET_BYTES);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
