use crate::middlewares::current_principal;
use crate::models::*;
use crate::services::ClassService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/classes",
    tag = "class",
    request_body = CreateClassRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "创建班级成功", body = ClassResponse),
        (status = 403, description = "需要教师身份"),
        (status = 409, description = "加入码生成失败")
    )
)]
/// 教师创建班级, 返回自动生成的唯一加入码
pub async fn create_class(
    service: web::Data<ClassService>,
    req: HttpRequest,
    body: web::Json<CreateClassRequest>,
) -> Result<HttpResponse> {
    let principal = match current_principal(&req) {
        Ok(p) => p,
        Err(e) => return Ok(e.error_response()),
    };
    match service.create_class(&principal, &body.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/classes",
    tag = "class",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取班级列表成功", body = [ClassResponse]),
        (status = 401, description = "未授权")
    )
)]
/// 列出与当前账号相关的班级 (教师: 创建的; 学生: 在册的)
pub async fn list_classes(
    service: web::Data<ClassService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let principal = match current_principal(&req) {
        Ok(p) => p,
        Err(e) => return Ok(e.error_response()),
    };
    match service.list_classes(&principal).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/classes/join",
    tag = "class",
    request_body = JoinClassRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "加入班级成功", body = EnrollmentResponse),
        (status = 403, description = "需要学生身份"),
        (status = 404, description = "加入码无对应班级"),
        (status = 409, description = "已在该班级")
    )
)]
/// 学生凭加入码加入班级; 曾退出的学生重新加入时恢复在册状态
pub async fn join_class(
    service: web::Data<ClassService>,
    req: HttpRequest,
    body: web::Json<JoinClassRequest>,
) -> Result<HttpResponse> {
    let principal = match current_principal(&req) {
        Ok(p) => p,
        Err(e) => return Ok(e.error_response()),
    };
    match service.join_class(&principal, &body.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/classes/{class_id}/roster",
    tag = "class",
    params(
        ("class_id" = i64, Path, description = "班级ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取花名册成功", body = [RosterMemberResponse]),
        (status = 403, description = "班级不属于当前教师"),
        (status = 404, description = "班级不存在")
    )
)]
/// 教师查看班级花名册 (学生 + 其角色)
pub async fn get_roster(
    service: web::Data<ClassService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let principal = match current_principal(&req) {
        Ok(p) => p,
        Err(e) => return Ok(e.error_response()),
    };
    match service.roster(&principal, path.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/classes/{class_id}/students/{student_id}/enrollment",
    tag = "class",
    params(
        ("class_id" = i64, Path, description = "班级ID"),
        ("student_id" = i64, Path, description = "学生ID")
    ),
    request_body = UpdateEnrollmentRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "更新在册状态成功", body = EnrollmentResponse),
        (status = 403, description = "班级不属于当前教师"),
        (status = 404, description = "选课记录不存在")
    )
)]
/// 教师启停某学生的在册状态 (停用后不参与点名)
pub async fn update_enrollment(
    service: web::Data<ClassService>,
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
    body: web::Json<UpdateEnrollmentRequest>,
) -> Result<HttpResponse> {
    let principal = match current_principal(&req) {
        Ok(p) => p,
        Err(e) => return Ok(e.error_response()),
    };
    let (class_id, student_id) = path.into_inner();
    match service
        .update_enrollment(&principal, class_id, student_id, body.is_active)
        .await
    {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置 (与 character/selection 共享 /classes 前缀, 统一用完整路径注册)
pub fn class_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/classes", web::post().to(create_class))
        .route("/classes", web::get().to(list_classes))
        .route("/classes/join", web::post().to(join_class))
        .route("/classes/{class_id}/roster", web::get().to(get_roster))
        .route(
            "/classes/{class_id}/students/{student_id}/enrollment",
            web::put().to(update_enrollment),
        );
}
