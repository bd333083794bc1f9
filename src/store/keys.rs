pub fn sets_key(owner_id: &str) -> String {
    owner_id.to_string()
}

pub fn streak_key(owner_id: &str) -> String {
    owner_id.to_string()
}
