use uuid::Uuid;

/// Generates a fresh record id.
///
/// Ids are UUID v7 so they sort by creation time and stay unique when several
/// records are created within the same millisecond.
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_is_unique() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }
}
