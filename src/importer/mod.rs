// ==========================================
// 站台股道分配 - 导入层
// ==========================================
// 职责: 外部股道清单导入
// 支持: JSON, CSV, Excel
// ==========================================

pub mod error;
pub mod field_mapper;
pub mod file_parser;

use crate::domain::track::Inventory;
use std::path::Path;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::TrackFieldMapper;
pub use file_parser::{CsvParser, ExcelParser, InventoryParser, JsonParser, UniversalFileParser};

/// 按扩展名加载股道清单
///
/// # 返回
/// - Err(EmptyDataset): 文件中没有任何股道
pub fn load_inventory<P: AsRef<Path>>(path: P) -> ImportResult<Inventory> {
    let path = path.as_ref();
    let inventory = UniversalFileParser.parse_inventory(path)?;

    if inventory.is_empty() {
        return Err(ImportError::EmptyDataset(path.display().to_string()));
    }

    tracing::info!(path = %path.display(), tracks = inventory.len(), "股道清单已加载");
    Ok(inventory)
}
