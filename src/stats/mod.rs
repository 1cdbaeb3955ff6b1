pub mod languages;
pub mod patterns;
pub mod tags;
pub mod timeline;

pub use languages::language_shares;
pub use patterns::coding_patterns;
pub use tags::rank_tags;
pub use timeline::activity_timeline;
