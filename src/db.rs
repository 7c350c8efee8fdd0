// ==========================================
// 生产管理系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一连接的 PRAGMA 行为（外键级联删除依赖 foreign_keys=ON）
// - 统一 busy_timeout
// - 启动时建表（幂等），并记录 schema_version
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 基础数据表结构
///
/// 说明：
/// - 枚举约束使用具名 CHECK，便于错误信息定位到约束
/// - updated_at 由触发器维护，服务层不写时间戳
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS production_lines (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    line_number TEXT NOT NULL UNIQUE,
    line_name TEXT NOT NULL,
    line_type TEXT NOT NULL,
    shift INTEGER NOT NULL DEFAULT 0,
    speed REAL NOT NULL DEFAULT 0,
    efficiency REAL NOT NULL DEFAULT 0,
    "group" INTEGER,
    flow_code TEXT,
    abbreviation TEXT,
    operator_id TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    CONSTRAINT ck_production_lines_line_type CHECK (line_type IN ('车身', '涂装', '总装')),
    CONSTRAINT ck_production_lines_shift CHECK (shift >= 0),
    CONSTRAINT ck_production_lines_speed CHECK (speed >= 0)
);

CREATE TABLE IF NOT EXISTS production_line_special_info (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    production_line_id INTEGER NOT NULL,
    code_type TEXT NOT NULL,
    code_value TEXT NOT NULL,
    line_type TEXT NOT NULL,
    operator_id TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (production_line_id) REFERENCES production_lines(id) ON DELETE CASCADE,
    CONSTRAINT uq_special_info_line_code UNIQUE (production_line_id, code_type, code_value),
    CONSTRAINT ck_special_info_code_type CHECK (code_type IN ('WhiteBodyCode', 'ColorCode')),
    CONSTRAINT ck_special_info_line_type CHECK (line_type IN ('车身', '涂装', '总装'))
);

CREATE INDEX IF NOT EXISTS idx_special_info_line_code
    ON production_line_special_info(production_line_id, code_type);

CREATE TABLE IF NOT EXISTS special_engines (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    engine_code TEXT NOT NULL UNIQUE,
    gear TEXT NOT NULL,
    engine_name TEXT NOT NULL,
    operator_id TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS planned_colors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    color_code TEXT NOT NULL UNIQUE,
    color_name TEXT NOT NULL,
    top_coat_color TEXT,
    operator_id TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TRIGGER IF NOT EXISTS update_production_lines_timestamp
AFTER UPDATE ON production_lines
FOR EACH ROW
BEGIN
    UPDATE production_lines SET updated_at = CURRENT_TIMESTAMP WHERE id = NEW.id;
END;

CREATE TRIGGER IF NOT EXISTS update_production_line_special_info_timestamp
AFTER UPDATE ON production_line_special_info
FOR EACH ROW
BEGIN
    UPDATE production_line_special_info SET updated_at = CURRENT_TIMESTAMP WHERE id = NEW.id;
END;

CREATE TRIGGER IF NOT EXISTS update_special_engines_timestamp
AFTER UPDATE ON special_engines
FOR EACH ROW
BEGIN
    UPDATE special_engines SET updated_at = CURRENT_TIMESTAMP WHERE id = NEW.id;
END;

CREATE TRIGGER IF NOT EXISTS update_planned_colors_timestamp
AFTER UPDATE ON planned_colors
FOR EACH ROW
BEGIN
    UPDATE planned_colors SET updated_at = CURRENT_TIMESTAMP WHERE id = NEW.id;
END;
"#;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启，否则级联删除不生效
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接、应用统一配置并初始化表结构
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let mut conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    init_schema(&mut conn)?;
    Ok(conn)
}

/// 初始化表结构（幂等）
pub fn init_schema(conn: &mut Connection) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    tx.commit()?;

    match read_schema_version(conn)? {
        Some(v) if v > CURRENT_SCHEMA_VERSION => {
            tracing::warn!(
                db_version = v,
                expected = CURRENT_SCHEMA_VERSION,
                "数据库 schema_version 高于当前程序版本"
            );
        }
        _ => {}
    }
    Ok(())
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}
