// ==========================================
// 站台股道分配 - 引擎层
// ==========================================
// 职责: 股道可行性判定与多准则排序
// 红线: 纯计算,不做 I/O;所有建议必须输出 reason
// ==========================================

pub mod error;
pub mod feasibility;
pub mod justification;
pub mod metadata;
pub mod planned_track;
pub mod ranker;
pub mod scoring;
pub mod selector;
pub mod track_name;

// 重导出核心引擎
pub use error::{EngineError, EngineResult};
pub use feasibility::{meets_length, ExclusionReason, FeasibilityFilter};
pub use justification::JustificationGenerator;
pub use metadata::build_track_metadata;
pub use planned_track::{PlannedTrack, PlannedTrackInfo, PlannedTrackResolver};
pub use ranker::{criterion_value, Ranker, SortValue};
pub use scoring::CandidateScorer;
pub use selector::{select_tracks, TrackSelector, MAX_ALTERNATIVES};
pub use track_name::{parse_track_name, ParsedTrackName};
