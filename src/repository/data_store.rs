// ==========================================
// 生产管理系统 - 数据存储（单连接）
// ==========================================
// 职责: 持有唯一的数据库连接，提供参数化语句执行原语
// 约束:
// - 不做连接池，所有调用共享同一连接（Mutex 串行化）
// - 连接生命周期显式管理: connect → execute... → close
// - 连接前/关闭后的调用一律返回 NotConnected
// ==========================================

use rusqlite::types::{ToSql, ValueRef};
use rusqlite::Connection;
use serde_json::{Map, Number, Value};
use std::sync::{Mutex, MutexGuard};

use crate::db::open_sqlite_connection;
use crate::perf::install_sqlite_tracing;
use crate::repository::error::{RepositoryError, RepositoryResult};

/// 读语句返回的单行（列名 → 值）
pub type Row = Map<String, Value>;

/// 语句执行结果，按语句形态区分
#[derive(Debug, Clone, PartialEq)]
pub enum ExecOutcome {
    /// 查询语句（SELECT / PRAGMA / WITH）
    Rows(Vec<Row>),
    /// INSERT 语句
    Inserted { inserted_id: i64, affected: usize },
    /// UPDATE / DELETE 等其他语句
    Affected { affected: usize },
}

impl ExecOutcome {
    pub fn inserted_id(&self) -> Option<i64> {
        match self {
            ExecOutcome::Inserted { inserted_id, .. } => Some(*inserted_id),
            _ => None,
        }
    }

    pub fn affected(&self) -> usize {
        match self {
            ExecOutcome::Rows(_) => 0,
            ExecOutcome::Inserted { affected, .. } | ExecOutcome::Affected { affected } => *affected,
        }
    }

    pub fn into_rows(self) -> Vec<Row> {
        match self {
            ExecOutcome::Rows(rows) => rows,
            _ => Vec::new(),
        }
    }
}

/// 语句形态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Read,
    Insert,
    Mutate,
}

impl StatementKind {
    /// 按首个关键字判断语句形态（忽略大小写与前导空白）
    pub fn classify(sql: &str) -> Self {
        let keyword = sql
            .trim_start()
            .split(|c: char| c.is_whitespace() || c == '(')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match keyword.as_str() {
            "select" | "pragma" | "with" | "explain" => StatementKind::Read,
            "insert" | "replace" => StatementKind::Insert,
            _ => StatementKind::Mutate,
        }
    }
}

// ==========================================
// DataStore - 数据存储
// ==========================================
pub struct DataStore {
    conn: Mutex<Option<Connection>>,
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStore {
    /// 创建未连接的数据存储
    pub fn new() -> Self {
        Self {
            conn: Mutex::new(None),
        }
    }

    /// 打开数据库文件并建立连接（已连接时保持原连接）
    pub fn connect(&self, db_path: &str) -> RepositoryResult<()> {
        let mut guard = self.lock()?;
        if guard.is_some() {
            tracing::warn!("数据库已连接，忽略重复连接请求: {}", db_path);
            return Ok(());
        }

        let mut conn = open_sqlite_connection(db_path).map_err(|e| match RepositoryError::from(e) {
            RepositoryError::DatabaseQueryError(msg) => RepositoryError::ConnectivityError(msg),
            other => other,
        })?;
        install_sqlite_tracing(&mut conn);

        *guard = Some(conn);
        tracing::info!("数据库连接成功: {}", db_path);
        Ok(())
    }

    /// 关闭连接（幂等）
    pub fn close(&self) -> RepositoryResult<()> {
        let mut guard = self.lock()?;
        if let Some(conn) = guard.take() {
            conn.close()
                .map_err(|(_, e)| RepositoryError::ConnectivityError(e.to_string()))?;
            tracing::info!("数据库连接已关闭");
        }
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.conn.lock().map(|g| g.is_some()).unwrap_or(false)
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Option<Connection>>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 在已建立的连接上执行闭包
    pub fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&Connection) -> RepositoryResult<T>,
    {
        let guard = self.lock()?;
        let conn = guard.as_ref().ok_or(RepositoryError::NotConnected)?;
        f(conn)
    }

    /// 执行参数化语句
    ///
    /// # 返回
    /// - 查询语句: ExecOutcome::Rows
    /// - INSERT: ExecOutcome::Inserted（含自增 id）
    /// - 其他: ExecOutcome::Affected
    pub fn execute(&self, sql: &str, params: &[&dyn ToSql]) -> RepositoryResult<ExecOutcome> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(sql)?;
            match StatementKind::classify(sql) {
                StatementKind::Read => {
                    let columns: Vec<String> =
                        stmt.column_names().iter().map(|c| c.to_string()).collect();
                    let mut rows = stmt.query(params)?;
                    let mut out = Vec::new();
                    while let Some(row) = rows.next()? {
                        let mut map = Map::with_capacity(columns.len());
                        for (i, name) in columns.iter().enumerate() {
                            map.insert(name.clone(), value_to_json(row.get_ref(i)?));
                        }
                        out.push(map);
                    }
                    Ok(ExecOutcome::Rows(out))
                }
                StatementKind::Insert => {
                    let affected = stmt.execute(params)?;
                    Ok(ExecOutcome::Inserted {
                        inserted_id: conn.last_insert_rowid(),
                        affected,
                    })
                }
                StatementKind::Mutate => {
                    let affected = stmt.execute(params)?;
                    Ok(ExecOutcome::Affected { affected })
                }
            }
        })
    }

    /// 查询并按行映射为领域对象
    pub fn query<T, F>(&self, sql: &str, params: &[&dyn ToSql], mut map_row: F) -> RepositoryResult<Vec<T>>
    where
        F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
    {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let items = stmt
                .query_map(params, |row| map_row(row))?
                .collect::<rusqlite::Result<Vec<T>>>()?;
            Ok(items)
        })
    }

    /// 查询单行（无结果返回 None）
    pub fn query_optional<T, F>(&self, sql: &str, params: &[&dyn ToSql], map_row: F) -> RepositoryResult<Option<T>>
    where
        F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
    {
        Ok(self.query(sql, params, map_row)?.into_iter().next())
    }
}

fn value_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Number(i.into()),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::Array(b.iter().map(|x| Value::Number((*x).into())).collect()),
    }
}
