/// Number of dot-separated segments of a compact token (header, claims, signature)
pub const TOKEN_SEGMENTS: usize = 3;
/// Position of the claims segment in a compact token
pub const CLAIMS_SEGMENT_INDEX: usize = 1;
