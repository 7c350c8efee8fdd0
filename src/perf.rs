// ==========================================
// 生产管理系统 - SQL 性能统计
// ==========================================
// 使用 rusqlite trace/profile 回调统计每次请求的语句数与慢语句
// 开关:
// - Debug 默认开启；Release 默认关闭
// - LINE_REFDATA_PERF_SQL=1 强制开启
// - LINE_REFDATA_SLOW_SQL_MS=50 慢语句阈值（毫秒）
// ==========================================

use rusqlite::Connection;
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

const ENV_PERF_SQL: &str = "LINE_REFDATA_PERF_SQL";
const ENV_SLOW_SQL_MS: &str = "LINE_REFDATA_SLOW_SQL_MS";
const MAX_LOGGED_SQL_LEN: usize = 300;

static PROFILING_ENABLED: AtomicBool = AtomicBool::new(false);
static SLOW_SQL_MS: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static ACTIVE_GUARDS: Cell<u32> = const { Cell::new(0) };
    static STATEMENTS: Cell<u64> = const { Cell::new(0) };
    static SLOW_STATEMENTS: Cell<u64> = const { Cell::new(0) };
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().map(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn shorten_sql(sql: &str) -> String {
    let flat = sql.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(MAX_LOGGED_SQL_LEN) {
        Some((idx, _)) => format!("{}…", &flat[..idx]),
        None => flat,
    }
}

/// 在连接上安装语句 trace/profile 回调
pub fn install_sqlite_tracing(conn: &mut Connection) {
    let enabled = env_flag(ENV_PERF_SQL).unwrap_or(cfg!(debug_assertions));
    PROFILING_ENABLED.store(enabled, Ordering::Relaxed);

    if !enabled {
        conn.trace(None);
        conn.profile(None);
        return;
    }

    let slow_ms = std::env::var(ENV_SLOW_SQL_MS)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(if cfg!(debug_assertions) { 50 } else { 200 });
    SLOW_SQL_MS.store(slow_ms, Ordering::Relaxed);

    conn.trace(Some(on_statement));
    conn.profile(Some(on_statement_done));
}

fn guard_active() -> bool {
    ACTIVE_GUARDS.with(|g| g.get() > 0)
}

fn on_statement(sql: &str) {
    if !PROFILING_ENABLED.load(Ordering::Relaxed) || !guard_active() {
        return;
    }
    STATEMENTS.with(|c| c.set(c.get().saturating_add(1)));
    tracing::trace!(target: "sql", sql = %shorten_sql(sql), "statement");
}

fn on_statement_done(sql: &str, duration: Duration) {
    if !PROFILING_ENABLED.load(Ordering::Relaxed) {
        return;
    }
    let threshold = SLOW_SQL_MS.load(Ordering::Relaxed);
    let ms = duration.as_millis() as u64;
    if threshold == 0 || ms < threshold {
        return;
    }

    tracing::warn!(
        target: "slow_sql",
        duration_ms = ms,
        sql = %shorten_sql(sql),
        "slow sql"
    );
    if guard_active() {
        SLOW_STATEMENTS.with(|c| c.set(c.get().saturating_add(1)));
    }
}

/// 单次请求的耗时与语句统计，Drop 时输出一条 perf 日志
///
/// ```ignore
/// let _perf = line_refdata::perf::PerfGuard::new("ipc.get-production-lines");
/// ```
pub struct PerfGuard {
    op: &'static str,
    started: Instant,
    statements_before: u64,
    slow_before: u64,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        ACTIVE_GUARDS.with(|g| g.set(g.get().saturating_add(1)));
        Self {
            op,
            started: Instant::now(),
            statements_before: STATEMENTS.with(|c| c.get()),
            slow_before: SLOW_STATEMENTS.with(|c| c.get()),
        }
    }

    /// 当前守卫范围内已执行的语句数
    pub fn statement_count(&self) -> u64 {
        STATEMENTS.with(|c| c.get()).saturating_sub(self.statements_before)
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let slow_sql_count = SLOW_STATEMENTS
            .with(|c| c.get())
            .saturating_sub(self.slow_before);

        tracing::debug!(
            target: "perf",
            op = self.op,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            sql_count = self.statement_count(),
            slow_sql_count,
            "done"
        );

        ACTIVE_GUARDS.with(|g| g.set(g.get().saturating_sub(1)));
    }
}
