pub mod config;
pub mod context;
pub mod debrid;
pub mod media;
pub mod metrics;
pub mod orchestrator;
pub mod searcher;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, HttpConfig,
    JackettConfig, PollingConfig, RealDebridConfig, SanitizedConfig, ServerConfig,
};
pub use context::{ProgressCallback, ScrapeContext};
pub use debrid::{
    classify_quality, rank_streams, CachedTorrent, DebridClient, DebridError, Quality,
    RealDebridClient, ResolvedStream, TorrentStatus,
};
pub use media::{MediaDescriptor, MediaKind, MovieMedia, ShowMedia};
pub use orchestrator::{
    EmbedDescriptor, FailureKind, Flag, RealDebridScraper, ScrapeError, SourceInfo,
    SourcererOutput, StreamDescriptor, StreamType,
};
pub use searcher::{IndexerResult, JackettSearcher, SearchError, Searcher};
