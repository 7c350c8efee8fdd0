// ==========================================
// 请求分发与桥接 集成测试
// ==========================================
// 测试范围:
// 1. Dispatcher: 通道 → API，结果形态与错误响应
// 2. 桥接: 单一工作任务串行处理、行协议
// ==========================================

mod helpers;
mod test_helpers;

use helpers::api_test_helper::*;
use line_refdata::app::{spawn_bridge, ResponseEnvelope, DEFAULT_QUEUE_CAPACITY};
use serde_json::{json, Value};

fn line_payload(number: &str) -> Value {
    json!({
        "line_number": number,
        "line_name": "body line",
        "line_type": "车身",
        "shift": 2,
        "speed": 60.0,
        "efficiency": 90.0
    })
}

fn created_id(value: &Value) -> i64 {
    assert_eq!(value["success"], json!(true));
    value["id"].as_i64().expect("缺少 id")
}

// ==========================================
// Dispatcher
// ==========================================

#[test]
fn test_dispatch_生产线增改删查() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let dispatcher = env.dispatcher();

    let created = dispatcher
        .dispatch("add-production-line", line_payload("l1"))
        .expect("新增失败");
    let id = created_id(&created);

    let lines = dispatcher
        .dispatch("get-production-lines", Value::Null)
        .expect("查询失败");
    assert_eq!(lines[0]["line_number"], json!("L1"));
    assert_eq!(lines[0]["line_type"], json!("车身"));

    let mut update = line_payload("L1");
    update["id"] = json!(id);
    update["line_type"] = json!("总装");
    let updated = dispatcher
        .dispatch("update-production-line", update)
        .expect("修改失败");
    assert_eq!(updated, json!({ "success": true }));

    let deleted = dispatcher
        .dispatch("delete-production-line", json!({ "id": id }))
        .expect("删除失败");
    assert_eq!(deleted, json!({ "success": true }));

    let lines = dispatcher
        .dispatch("get-production-lines", json!({}))
        .expect("查询失败");
    assert_eq!(lines, json!([]));
}

#[test]
fn test_dispatch_特殊信息与错误详情() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let dispatcher = env.dispatcher();
    let line_id = created_id(
        &dispatcher
            .dispatch("add-production-line", line_payload("L1"))
            .expect("新增失败"),
    );

    let info = json!({
        "production_line_id": line_id,
        "code_type": "WhiteBodyCode",
        "code_value": "w1"
    });
    created_id(
        &dispatcher
            .dispatch("add-production-line-special-info", info.clone())
            .expect("新增失败"),
    );

    println!("重复代码 → DUPLICATE_ENTRY");
    let err = dispatcher
        .dispatch("add-production-line-special-info", info)
        .unwrap_err();
    assert_eq!(err.code, "DUPLICATE_ENTRY");
    assert_eq!(err.details, Some(json!({ "field": "WhiteBodyCode", "value": "W1" })));

    println!("生产线不存在 → REFERENCE_NOT_FOUND");
    let err = dispatcher
        .dispatch(
            "add-production-line-special-info",
            json!({ "production_line_id": 999, "code_type": "ColorCode", "code_value": "C1" }),
        )
        .unwrap_err();
    assert_eq!(err.code, "REFERENCE_NOT_FOUND");
    assert_eq!(err.details, Some(json!({ "entity": "production_line", "id": 999 })));

    println!("查询使用 lineId/codeType");
    let items = dispatcher
        .dispatch(
            "get-production-line-special-info",
            json!({ "lineId": line_id, "codeType": "WhiteBodyCode" }),
        )
        .expect("查询失败");
    assert_eq!(items[0]["code_value"], json!("W1"));
    assert_eq!(items[0]["line_type"], json!("车身"));
}

#[test]
fn test_dispatch_约束违反响应() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let dispatcher = env.dispatcher();

    dispatcher
        .dispatch("add-special-engine", json!({ "engine_code": "E1", "gear": "6AT", "engine_name": "A" }))
        .expect("新增失败");
    let err = dispatcher
        .dispatch("add-special-engine", json!({ "engine_code": "E1", "gear": "8AT", "engine_name": "B" }))
        .unwrap_err();

    assert_eq!(err.code, "CONSTRAINT_VIOLATION");
    assert_eq!(
        err.details,
        Some(json!({ "entity": "special_engine", "field": "engine_code" }))
    );
    assert!(err.message.contains("\"E1\""), "{}", err.message);
}

#[test]
fn test_dispatch_非法请求() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let dispatcher = env.dispatcher();

    let err = dispatcher.dispatch("drop-everything", json!({})).unwrap_err();
    assert_eq!(err.code, "INVALID_INPUT");

    // 未知字段拒绝
    let mut payload = line_payload("L1");
    payload["colour"] = json!("red");
    let err = dispatcher.dispatch("add-production-line", payload).unwrap_err();
    assert_eq!(err.code, "INVALID_INPUT");

    // 枚举取值非法
    let mut payload = line_payload("L1");
    payload["line_type"] = json!("焊装");
    let err = dispatcher.dispatch("add-production-line", payload).unwrap_err();
    assert_eq!(err.code, "INVALID_INPUT");

    let err = dispatcher
        .dispatch("delete-planned-color", json!({ "id": -1 }))
        .unwrap_err();
    assert_eq!(err.code, "INVALID_INPUT");
}

#[test]
fn test_dispatch_当前用户与未连接() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let dispatcher = env.dispatcher();

    let user = dispatcher
        .dispatch("get-current-user", Value::Null)
        .expect("获取用户失败");
    assert_eq!(user, json!(TEST_OPERATOR));

    env.state.shutdown();
    let err = dispatcher
        .dispatch("get-planned-colors", Value::Null)
        .unwrap_err();
    assert_eq!(err.code, "NOT_CONNECTED");
    assert_eq!(err.message, "数据库未连接");
}

// ==========================================
// 桥接
// ==========================================

#[tokio::test]
async fn test_bridge_并发请求串行处理() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let (bridge, worker) = spawn_bridge(env.dispatcher(), DEFAULT_QUEUE_CAPACITY);

    let mut tasks = Vec::new();
    for i in 0..20 {
        let bridge = bridge.clone();
        tasks.push(tokio::spawn(async move {
            bridge
                .invoke(
                    "add-planned-color",
                    json!({ "color_code": format!("C{:02}", i), "color_name": "c" }),
                )
                .await
        }));
    }

    let mut ids = Vec::new();
    for task in tasks {
        let reply = task.await.expect("任务异常").expect("新增失败");
        ids.push(created_id(&reply));
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 20);

    let colors = bridge
        .invoke("get-planned-colors", Value::Null)
        .await
        .expect("查询失败");
    assert_eq!(colors.as_array().map(Vec::len), Some(20));
    assert_eq!(colors[0]["color_code"], json!("C00"));

    // 句柄全部释放后工作任务退出
    drop(bridge);
    worker.await.expect("工作任务异常");
}

#[tokio::test]
async fn test_bridge_行协议() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let (bridge, _worker) = spawn_bridge(env.dispatcher(), 4);

    let response = bridge
        .handle_line(r#"{"id": 7, "channel": "get-current-user"}"#)
        .await;
    assert!(response.ok);
    assert_eq!(response.id, Some(json!(7)));
    assert_eq!(response.result, Some(json!(TEST_OPERATOR)));

    let response = bridge
        .handle_line(r#"{"id": "x", "channel": "delete-special-engine", "payload": {}}"#)
        .await;
    assert!(!response.ok);
    assert_eq!(response.id, Some(json!("x")));
    assert_eq!(response.error.as_ref().map(|e| e.code.as_str()), Some("INVALID_INPUT"));

    let response = bridge.handle_line("not json").await;
    assert!(!response.ok);
    assert_eq!(response.id, None);

    // 应答可序列化为单行 JSON
    let text = serde_json::to_string(&response).expect("序列化失败");
    assert!(!text.contains('\n'));
    let back: ResponseEnvelope = serde_json::from_str(&text).expect("反序列化失败");
    assert_eq!(back.error.map(|e| e.code), Some("INVALID_INPUT".to_string()));
}
