/// Keys used to pass data between tasks through the flow context
pub mod session_keys {
    pub const KEYWORD: &str = "keyword";
    pub const SEARCH_RESULTS: &str = "search_results";
    pub const OUTCOME: &str = "outcome";
}
