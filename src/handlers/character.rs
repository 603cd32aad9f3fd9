use crate::middlewares::current_principal;
use crate::models::*;
use crate::services::{BadgeService, CharacterService, RewardDelta, RewardService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/classes/{class_id}/characters",
    tag = "character",
    params(
        ("class_id" = i64, Path, description = "班级ID")
    ),
    request_body = CreateCharacterRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "创建角色成功", body = CharacterResponse),
        (status = 403, description = "未在册或需要学生身份"),
        (status = 404, description = "职业不存在"),
        (status = 409, description = "该班级已有角色")
    )
)]
/// 学生在已加入的班级里创建角色 (一个班级一个)
pub async fn create_character(
    service: web::Data<CharacterService>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<CreateCharacterRequest>,
) -> Result<HttpResponse> {
    let principal = match current_principal(&req) {
        Ok(p) => p,
        Err(e) => return Ok(e.error_response()),
    };
    match service
        .create_character(&principal, path.into_inner(), &body.into_inner())
        .await
    {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/classes/{class_id}/characters/me",
    tag = "character",
    params(
        ("class_id" = i64, Path, description = "班级ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取角色成功", body = CharacterResponse),
        (status = 404, description = "角色不存在")
    )
)]
/// 学生查看自己在该班级的角色
pub async fn get_my_character(
    service: web::Data<CharacterService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let principal = match current_principal(&req) {
        Ok(p) => p,
        Err(e) => return Ok(e.error_response()),
    };
    match service.my_character(&principal, path.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/characters/{character_id}/reward",
    tag = "character",
    params(
        ("character_id" = i64, Path, description = "角色ID")
    ),
    request_body = RewardRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "奖励结算成功", body = RewardResponse),
        (status = 400, description = "经验增量为负"),
        (status = 403, description = "角色所在班级不属于当前教师"),
        (status = 404, description = "角色不存在")
    )
)]
/// 教师给角色结算一次奖励:
/// 1. 生命/光能钳制在 [0, 上限], 经验只增不减
/// 2. 跨级时给学生投递升级通知 (失败不影响结算)
/// 3. 结算后统一评估徽章
pub async fn reward_character(
    service: web::Data<RewardService>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<RewardRequest>,
) -> Result<HttpResponse> {
    let principal = match current_principal(&req) {
        Ok(p) => p,
        Err(e) => return Ok(e.error_response()),
    };
    let delta = RewardDelta {
        experience: body.experience_delta,
        light: body.light_delta,
        health: body.health_delta,
    };
    match service
        .apply_reward(&principal, path.into_inner(), delta)
        .await
    {
        Ok(outcome) => {
            let data = RewardResponse {
                character: outcome.character.clone().into(),
                level_changed: outcome.level_changed,
                old_level: outcome.old_level,
                new_level: outcome.new_level,
                new_badges: outcome.new_badges.into_iter().map(Into::into).collect(),
            };
            Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/characters/{character_id}/badges",
    tag = "character",
    params(
        ("character_id" = i64, Path, description = "角色ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取徽章成功", body = [BadgeUnlockResponse]),
        (status = 403, description = "无权查看该角色"),
        (status = 404, description = "角色不存在")
    )
)]
/// 查看角色已解锁的徽章 (角色拥有者或所在班级的教师)
pub async fn get_character_badges(
    service: web::Data<BadgeService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let principal = match current_principal(&req) {
        Ok(p) => p,
        Err(e) => return Ok(e.error_response()),
    };
    match service.list_unlocked(&principal, path.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置 (与 class/selection 共享 /classes 前缀, 统一用完整路径注册)
pub fn character_config(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/classes/{class_id}/characters",
        web::post().to(create_character),
    )
    .route(
        "/classes/{class_id}/characters/me",
        web::get().to(get_my_character),
    )
    .route(
        "/characters/{character_id}/reward",
        web::post().to(reward_character),
    )
    .route(
        "/characters/{character_id}/badges",
        web::get().to(get_character_badges),
    );
}
