use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, get, post, put, web};
use payloads::Role;
use payloads::requests::ChangeRole;
use uuid::Uuid;

use crate::store::{EMPLOYEES, NOTIFICATIONS, Store};

use super::{APIError, get_account, respond};

#[tracing::instrument(skip(request, store), fields(user_id = tracing::field::Empty))]
#[put("/employees/role")]
pub async fn change_role(
    request: HttpRequest,
    details: web::Json<ChangeRole>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let (_, account) = get_account(&request, &store)?;
    if account.role != Role::Admin {
        return Err(APIError::AuthError(anyhow::anyhow!(
            "Only admins can change roles"
        )));
    }
    let employee = store.change_role(details.employee_id.0, details.role)?;
    Ok(respond(
        StatusCode::OK,
        "Role updated successfully",
        [(EMPLOYEES.singular, employee)],
    ))
}

#[tracing::instrument(skip(request, store), fields(user_id = tracing::field::Empty))]
#[post("/contracts/{contract_id}/public-link")]
pub async fn public_contract_link(
    request: HttpRequest,
    path: web::Path<i64>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    get_account(&request, &store)?;
    let token = Uuid::new_v4().simple().to_string();
    let token = store.public_contract_link(path.into_inner(), token)?;
    Ok(respond(
        StatusCode::CREATED,
        "Public link created",
        [("token", token.into())],
    ))
}

#[tracing::instrument(skip(request, store), fields(user_id = tracing::field::Empty))]
#[get("/notifications/current-user")]
pub async fn current_user_notifications(
    request: HttpRequest,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let (_, account) = get_account(&request, &store)?;
    let notifications = store.notifications_for(account.user_id)?;
    Ok(respond(
        StatusCode::OK,
        "",
        [(NOTIFICATIONS.plural, notifications.into())],
    ))
}
