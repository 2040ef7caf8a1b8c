//! TETR.IO REST API endpoint constants.

/// Base URL for the TETR.IO Tetra Channel API.
pub const TETRIO_BASE_URL: &str = "https://ch.tetr.io/api";

/// Header carrying the session id.
pub const SESSION_HEADER: &str = "X-Session-Id";

/// Full Tetra League leaderboard, ordered by rating.
pub const LEAGUE_LEADERBOARD: &str = "/users/lists/league/all";

/// Longest username the API accepts.
pub const MAX_USERNAME_LEN: usize = 60;

/// User lookup by username. Usernames are case-insensitive.
pub fn user(username: &str) -> String {
    format!("/users/{}", urlencoding::encode(&username.to_lowercase()))
}

/// User search by a linked external id.
pub fn user_search(external_id: &str) -> String {
    format!("/users/search/{}", urlencoding::encode(external_id))
}

/// Recent Tetra League matches of a user.
pub fn recent_matches(user_id: &str) -> String {
    format!(
        "/streams/league_userrecent_{}",
        urlencoding::encode(user_id)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_path_is_lowercased_and_escaped() {
        assert_eq!(user("OSK"), "/users/osk");
        assert_eq!(user("a b/c"), "/users/a%20b%2Fc");
    }

    #[test]
    fn test_stream_path() {
        assert_eq!(
            recent_matches("5e32fc85ab319c2ab1beb07c"),
            "/streams/league_userrecent_5e32fc85ab319c2ab1beb07c"
        );
    }

    #[test]
    fn test_search_path() {
        assert_eq!(user_search("discord:1234"), "/users/search/discord%3A1234");
    }
}
