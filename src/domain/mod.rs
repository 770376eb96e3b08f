// ==========================================
// 站台股道分配 - 领域层
// ==========================================
// 职责: 股道清单、列车请求、候选记录与值类型
// ==========================================

pub mod candidate;
pub mod track;
pub mod train;
pub mod types;

pub use candidate::CandidateRecord;
pub use track::{Inventory, RawNumber, TrackMetadata, TrackMetadataMap, TrackRecord};
pub use train::{
    normalize_category, SuggestedTrack, SuggestionResponse, SuggestionResult, TrainRequest,
    PRM_CATEGORY,
};
pub use types::{PlatformProfile, PriorityTier, Proximity, SortOrdinal};
