use crate::middlewares::current_principal;
use crate::models::*;
use crate::services::SelectionService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/classes/{class_id}/random-select",
    tag = "selection",
    params(
        ("class_id" = i64, Path, description = "班级ID")
    ),
    request_body = RandomSelectRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "点名成功", body = SelectionOutcomeResponse),
        (status = 400, description = "奖励数值为负"),
        (status = 403, description = "班级不属于当前教师"),
        (status = 404, description = "班级不存在"),
        (status = 409, description = "班级没有可选角色")
    )
)]
/// 随机点一名学生并发放奖励:
/// 1. 候选 = 在册学生的角色, 排除最近窗口内点过的 (排空则回退全名单)
/// 2. 加权随机抽取
/// 3. 奖励结算与台账写入在同一事务
pub async fn select_random(
    service: web::Data<SelectionService>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<RandomSelectRequest>,
) -> Result<HttpResponse> {
    let principal = match current_principal(&req) {
        Ok(p) => p,
        Err(e) => return Ok(e.error_response()),
    };
    match service
        .select_random(&principal, path.into_inner(), &body.into_inner())
        .await
    {
        Ok(outcome) => {
            let data = SelectionOutcomeResponse {
                record: outcome.record.into(),
                character: outcome.reward.character.clone().into(),
                level_changed: outcome.reward.level_changed,
                new_badges: outcome
                    .reward
                    .new_badges
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            };
            Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/classes/{class_id}/selections",
    tag = "selection",
    params(
        ("class_id" = i64, Path, description = "班级ID"),
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20)")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取点名台账成功", body = SelectionRecordPage),
        (status = 403, description = "班级不属于当前教师"),
        (status = 404, description = "班级不存在")
    )
)]
/// 分页获取班级点名台账 (倒序)
pub async fn get_selection_history(
    service: web::Data<SelectionService>,
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<SelectionHistoryQuery>,
) -> Result<HttpResponse> {
    let principal = match current_principal(&req) {
        Ok(p) => p,
        Err(e) => return Ok(e.error_response()),
    };
    match service
        .list_records(&principal, path.into_inner(), &query.into_inner())
        .await
    {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置 (与 class/character 共享 /classes 前缀, 统一用完整路径注册)
pub fn selection_config(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/classes/{class_id}/random-select",
        web::post().to(select_random),
    )
    .route(
        "/classes/{class_id}/selections",
        web::get().to(get_selection_history),
    );
}
