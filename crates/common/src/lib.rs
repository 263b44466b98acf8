//! Process-level helpers shared by the server and binaries.

pub mod env;
pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(serde_json::to_value(&h).unwrap()["status"], "ok");
    }
}
