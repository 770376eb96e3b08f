// ==========================================
// 站台股道分配 - 股道清单文件解析器
// ==========================================
// 支持: JSON (.json) / CSV (.csv) / Excel (.xlsx/.xls)
// ==========================================

use crate::domain::track::{Inventory, TrackRecord};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::TrackFieldMapper;
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use serde_json::Value;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// JSON 清单的外层包装键
const JSON_WRAPPER_KEYS: &[&str] = &["binari", "tracks"];

/// 股道清单解析器
pub trait InventoryParser {
    fn parse_inventory(&self, file_path: &Path) -> ImportResult<Inventory>;
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

/// 表格行 → 清单(跳过无名称行)
fn rows_to_inventory(rows: Vec<HashMap<String, String>>) -> Inventory {
    let mapper = TrackFieldMapper;
    let mut inventory = Inventory::new();
    // 行号从 2 开始(第 1 行为表头)
    for (idx, row) in rows.iter().enumerate() {
        if let Some((name, record)) = mapper.map_row(row, idx + 2) {
            if inventory.insert(name.clone(), record).is_some() {
                tracing::warn!(track = %name, row = idx + 2, "股道名称重复,后出现的行覆盖前者");
            }
        }
    }
    inventory
}

// ==========================================
// JSON Parser 实现
// ==========================================
pub struct JsonParser;

impl JsonParser {
    /// 从 JSON 值解析清单
    ///
    /// # 规则
    /// - 顶层为 {"binari": {...}} 或 {"tracks": {...}} 时取内层
    /// - 否则顶层对象本身即为 名称 → 记录
    /// - 记录不是对象的股道被丢弃(告警)
    pub fn parse_value(&self, value: Value) -> ImportResult<Inventory> {
        let Value::Object(mut root) = value else {
            return Err(ImportError::JsonParseError(
                "顶层必须是 JSON 对象".to_string(),
            ));
        };

        let wrapped = JSON_WRAPPER_KEYS
            .iter()
            .find(|key| matches!(root.get(**key), Some(Value::Object(_))))
            .and_then(|key| root.remove(*key));
        let entries = match wrapped {
            Some(Value::Object(inner)) => inner,
            _ => root,
        };

        let mut inventory = Inventory::new();
        for (name, entry) in entries {
            match serde_json::from_value::<TrackRecord>(entry) {
                Ok(record) => {
                    inventory.insert(name, record);
                }
                Err(e) => {
                    tracing::warn!(track = %name, error = %e, "股道记录格式错误,已忽略");
                }
            }
        }
        Ok(inventory)
    }
}

impl InventoryParser for JsonParser {
    fn parse_inventory(&self, file_path: &Path) -> ImportResult<Inventory> {
        ensure_exists(file_path)?;
        let raw = std::fs::read_to_string(file_path)?;
        let value: Value = serde_json::from_str(&raw)?;
        self.parse_value(value)
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl InventoryParser for CsvParser {
    fn parse_inventory(&self, file_path: &Path) -> ImportResult<Inventory> {
        ensure_exists(file_path)?;

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if !TrackFieldMapper.has_name_column(&headers) {
            return Err(ImportError::MissingColumn("name".to_string()));
        }

        // 读取所有行
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(row_map);
        }

        Ok(rows_to_inventory(rows))
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl InventoryParser for ExcelParser {
    fn parse_inventory(&self, file_path: &Path) -> ImportResult<Inventory> {
        ensure_exists(file_path)?;

        let mut workbook = open_workbook_auto(file_path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut sheet_rows = range.rows();
        let header_row = sheet_rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();
        if !TrackFieldMapper.has_name_column(&headers) {
            return Err(ImportError::MissingColumn("name".to_string()));
        }

        // 读取数据行
        let mut rows = Vec::new();
        for data_row in sheet_rows {
            let mut row_map = HashMap::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), cell.to_string().trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(row_map);
        }

        Ok(rows_to_inventory(rows))
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl InventoryParser for UniversalFileParser {
    fn parse_inventory(&self, file_path: &Path) -> ImportResult<Inventory> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "json" => JsonParser.parse_inventory(file_path),
            "csv" => CsvParser.parse_inventory(file_path),
            "xlsx" | "xls" => ExcelParser.parse_inventory(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
