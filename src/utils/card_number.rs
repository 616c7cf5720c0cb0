use chrono::Utc;
use rand::Rng;

/// Generates a presentable card number: `FEEL` + the last six digits of the
/// current epoch-millis + a zero-padded two-digit random suffix.
///
/// Registrations landing on the same millisecond share the timestamp part,
/// so only the two random digits separate them; the unique index on
/// `membership.card_number` is the last line of defense.
pub fn generate_card_number() -> String {
    let millis = Utc::now().timestamp_millis().to_string();
    let suffix = &millis[millis.len().saturating_sub(6)..];
    let random: u8 = rand::thread_rng().gen_range(0..100);

    format!("FEEL{}{:02}", suffix, random)
}
