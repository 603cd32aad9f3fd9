use crate::models::{LevelThresholdResponse, ResolveLevelQuery, ResolveLevelResponse};
use crate::utils::{LEVEL_THRESHOLDS, resolve_level};
use actix_web::{HttpResponse, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/levels",
    tag = "level",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取等级阈值表成功", body = [LevelThresholdResponse])
    )
)]
/// 等级经验阈值表
pub async fn get_levels() -> Result<HttpResponse> {
    let data: Vec<LevelThresholdResponse> = LEVEL_THRESHOLDS
        .iter()
        .map(|&(level, experience_required)| LevelThresholdResponse {
            level,
            experience_required,
        })
        .collect();
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data })))
}

#[utoipa::path(
    get,
    path = "/levels/resolve",
    tag = "level",
    params(
        ("experience" = i64, Query, description = "累计经验")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "解析等级成功", body = ResolveLevelResponse)
    )
)]
/// 按累计经验解析等级
pub async fn resolve(query: web::Query<ResolveLevelQuery>) -> Result<HttpResponse> {
    let experience = query.experience;
    let data = ResolveLevelResponse {
        experience,
        level: resolve_level(experience),
    };
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data })))
}

/// 路由配置
pub fn level_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/levels")
            .route("", web::get().to(get_levels))
            .route("/resolve", web::get().to(resolve)),
    );
}
