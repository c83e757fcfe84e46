use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn payment_mac(secret: &str, order_id: &str, payment_id: &str) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    Some(mac)
}

/// Hex HMAC-SHA256 of `order_id|payment_id`, the signature the checkout widget hands back.
pub fn sign_payment(secret: &str, order_id: &str, payment_id: &str) -> String {
    payment_mac(secret, order_id, payment_id)
        .map(|mac| hex::encode(mac.finalize().into_bytes()))
        .unwrap_or_default()
}

pub fn verify_payment_signature(
    secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> bool {
    let Ok(provided) = hex::decode(signature.trim()) else {
        return false;
    };
    let Some(mac) = payment_mac(secret, order_id, payment_id) else {
        return false;
    };
    // verify_slice compares in constant time
    mac.verify_slice(&provided).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_own_signature() {
        let sig = sign_payment("key_secret", "order_Nx1", "pay_Ab2");
        assert_eq!(sig.len(), 64);
        assert!(verify_payment_signature("key_secret", "order_Nx1", "pay_Ab2", &sig));
    }

    #[test]
    fn rejects_tampering() {
        let sig = sign_payment("key_secret", "order_Nx1", "pay_Ab2");
        assert!(!verify_payment_signature("key_secret", "order_Nx1", "pay_Ab3", &sig));
        assert!(!verify_payment_signature("other", "order_Nx1", "pay_Ab2", &sig));
        assert!(!verify_payment_signature("key_secret", "order_Nx1", "pay_Ab2", "zz"));
        assert!(!verify_payment_signature("key_secret", "order_Nx1", "pay_Ab2", ""));
    }

    #[test]
    fn matches_known_vector() {
        // HMAC-SHA256("secret", "order_1|pay_1")
        let mut mac = HmacSha256::new_from_slice(b"secret").unwrap();
        mac.update(b"order_1|pay_1");
        let expected = hex::encode(mac.finalize().into_bytes());
        assert_eq!(sign_payment("secret", "order_1", "pay_1"), expected);
    }
}
