use serde::Deserialize;

// Wire structs for `ccusage blocks --json`. The schema belongs to ccusage, so
// every field is defaulted: missing or renamed fields degrade to zeros rather
// than failing the whole parse, and unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlocksResponse {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub actual_end_time: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_gap: bool,
    #[serde(default)]
    pub entries: u64,
    #[serde(default)]
    pub token_counts: TokenCounts,
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(rename = "costUSD", default)]
    pub cost_usd: f64,
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(default)]
    pub burn_rate: BurnRate,
    #[serde(default)]
    pub projection: Projection,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCounts {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub cache_creation_input_tokens: u64,
    #[serde(default)]
    pub cache_read_input_tokens: u64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnRate {
    #[serde(default)]
    pub tokens_per_minute: f64,
    #[serde(default)]
    pub cost_per_hour: f64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub remaining_minutes: i64,
}

/// The slice of an active block the status bar actually displays.
///
/// `Default` is the documented zero value; the driver substitutes it when a
/// fetch fails so formatting never has to special-case absence. Whether a
/// zero value means "no usage" or "fetch failed" is carried separately by the
/// fetch `Result`, never inferred from the fields themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlockUsage {
    pub entries: u64,
    pub total_tokens: u64,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_creation_tokens: u64,
    pub cache_read_tokens: u64,
    pub cost_usd: f64,
    pub remaining_minutes: i64,
    pub cost_per_hour: f64,
}

impl From<&Block> for BlockUsage {
    fn from(block: &Block) -> Self {
        BlockUsage {
            entries: block.entries,
            total_tokens: block.total_tokens,
            input_tokens: block.token_counts.input_tokens,
            output_tokens: block.token_counts.output_tokens,
            cache_creation_tokens: block.token_counts.cache_creation_input_tokens,
            cache_read_tokens: block.token_counts.cache_read_input_tokens,
            cost_usd: block.cost_usd,
            remaining_minutes: block.projection.remaining_minutes,
            cost_per_hour: block.burn_rate.cost_per_hour,
        }
    }
}
