// ==========================================
// 生产管理系统 - 请求桥接
// ==========================================
// 职责: 前端请求 → 单一工作任务 → Dispatcher → 应答
// 约束:
// - 所有请求经同一 mpsc 队列串行处理
// - 每个请求用 oneshot 回传结果
// - 数据库调用是阻塞的，放入 spawn_blocking 执行
// - 所有 BridgeHandle 释放后工作任务自然退出
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::api::ApiError;
use crate::app::dispatch::{Dispatcher, ErrorResponse};

/// 默认队列容量
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

type Reply = Result<Value, ErrorResponse>;

struct BridgeRequest {
    channel: String,
    payload: Value,
    reply: oneshot::Sender<Reply>,
}

/// 请求句柄（可克隆，供多个调用方共享）
#[derive(Clone)]
pub struct BridgeHandle {
    tx: mpsc::Sender<BridgeRequest>,
}

impl BridgeHandle {
    /// 发送请求并等待结果
    pub async fn invoke(&self, channel: impl Into<String>, payload: Value) -> Reply {
        let (reply_tx, reply_rx) = oneshot::channel();
        let request = BridgeRequest {
            channel: channel.into(),
            payload,
            reply: reply_tx,
        };

        if self.tx.send(request).await.is_err() {
            return Err(bridge_closed());
        }
        reply_rx.await.unwrap_or_else(|_| Err(bridge_closed()))
    }
}

// ==========================================
// 行协议（每行一个 JSON 请求/应答）
// ==========================================

/// 请求: {"id": 1, "channel": "get-production-lines", "payload": {...}}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestEnvelope {
    /// 调用方自定义的请求标识，原样回传
    #[serde(default)]
    pub id: Option<Value>,
    pub channel: String,
    #[serde(default)]
    pub payload: Value,
}

/// 应答: 成功时带 result，失败时带 error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

impl ResponseEnvelope {
    fn from_reply(id: Option<Value>, reply: Reply) -> Self {
        match reply {
            Ok(result) => Self {
                id,
                ok: true,
                result: Some(result),
                error: None,
            },
            Err(error) => Self {
                id,
                ok: false,
                result: None,
                error: Some(error),
            },
        }
    }
}

impl BridgeHandle {
    /// 处理一行请求文本
    pub async fn handle_line(&self, line: &str) -> ResponseEnvelope {
        match serde_json::from_str::<RequestEnvelope>(line) {
            Ok(request) => {
                let reply = self.invoke(request.channel, request.payload).await;
                ResponseEnvelope::from_reply(request.id, reply)
            }
            Err(e) => ResponseEnvelope::from_reply(
                None,
                Err(ErrorResponse::from(&ApiError::InvalidInput(format!(
                    "请求格式错误: {}",
                    e
                )))),
            ),
        }
    }
}

fn bridge_closed() -> ErrorResponse {
    ErrorResponse::from(&ApiError::Unknown("请求通道已关闭".to_string()))
}

/// 启动工作任务（须在 tokio 运行时内调用）
///
/// # 返回
/// - BridgeHandle: 请求句柄
/// - JoinHandle: 工作任务（句柄全部释放后结束）
pub fn spawn_bridge(dispatcher: Dispatcher, capacity: usize) -> (BridgeHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel::<BridgeRequest>(capacity.max(1));

    let worker = tokio::spawn(async move {
        tracing::debug!("请求桥接已启动");
        while let Some(BridgeRequest {
            channel,
            payload,
            reply,
        }) = rx.recv().await
        {
            let dispatcher = dispatcher.clone();
            let result = tokio::task::spawn_blocking(move || dispatcher.dispatch(&channel, payload))
                .await
                .unwrap_or_else(|e| {
                    Err(ErrorResponse::from(&ApiError::Unknown(format!("任务执行失败: {}", e))))
                });

            // 调用方已放弃等待时丢弃结果
            let _ = reply.send(result);
        }
        tracing::debug!("请求桥接已退出");
    });

    (BridgeHandle { tx }, worker)
}
