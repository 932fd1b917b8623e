//! The same handful of routes serve every collection.

use std::collections::HashMap;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use payloads::Role;
use serde_json::{Map, Value};

use crate::store::{Account, CollectionSpec, Store, collection};

use super::{APIError, get_account, respond};

/// Clients may only read.
fn check_writer(
    request: &HttpRequest,
    store: &Store,
) -> Result<Account, APIError> {
    let (_, account) = get_account(request, store)?;
    if account.role == Role::Client {
        return Err(APIError::AuthError(anyhow::anyhow!(
            "Clients can't change records"
        )));
    }
    Ok(account)
}

/// Collections whose new records remember the staff member who made them,
/// and the field that holds it.
const AUTHORED: &[(&str, &str)] =
    &[("tasks", "assign_by"), ("project-discussion-rooms", "assigner")];

fn stamp_author(body: &mut Value, account: &Account, field: &str) {
    if account.collection != "employees" {
        return;
    }
    let records: Vec<&mut Value> = match body {
        Value::Array(items) => items.iter_mut().collect(),
        one => vec![one],
    };
    for record in records {
        if let Value::Object(fields) = record {
            fields
                .entry(field)
                .or_insert_with(|| Value::from(account.user_id));
        }
    }
}

/// Answer with the singular key for one record and the plural key for more.
fn records_response(
    status: StatusCode,
    spec: CollectionSpec,
    message: String,
    mut records: Vec<Value>,
) -> HttpResponse {
    if records.len() == 1 {
        let record = records.remove(0);
        respond(status, message, [(spec.singular, record)])
    } else {
        respond(status, message, [(spec.plural, Value::Array(records))])
    }
}

/// Take the array a bulk body carries under the collection's plural key.
fn bulk_items(
    spec: CollectionSpec,
    mut body: Map<String, Value>,
) -> Result<Vec<Value>, APIError> {
    match body.remove(spec.plural) {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(APIError::BadRequest(anyhow::anyhow!(
            "Expected a list under \"{}\"",
            spec.plural
        ))),
    }
}

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[tracing::instrument(skip(request, query, store), fields(user_id = tracing::field::Empty))]
#[get("/{collection}")]
pub async fn list(
    request: HttpRequest,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    get_account(&request, &store)?;
    let spec = collection(&path)?;
    let records = store.list(spec.path, &query)?;
    Ok(respond(
        StatusCode::OK,
        "",
        [(spec.plural, Value::Array(records))],
    ))
}

#[tracing::instrument(skip(request, body, store), fields(user_id = tracing::field::Empty))]
#[post("/{collection}")]
pub async fn create(
    request: HttpRequest,
    path: web::Path<String>,
    body: web::Json<Value>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let account = check_writer(&request, &store)?;
    let spec = collection(&path)?;
    let mut body = body.into_inner();
    if let Some((_, field)) = AUTHORED.iter().find(|(path, _)| *path == spec.path)
    {
        stamp_author(&mut body, &account, field);
    }
    let created = store.create(spec.path, body)?;
    tracing::info!(collection = spec.path, count = created.len(), "created");
    Ok(records_response(
        StatusCode::CREATED,
        spec,
        format!("{} created successfully", capitalized(spec.singular)),
        created,
    ))
}

#[tracing::instrument(skip(request, store), fields(user_id = tracing::field::Empty))]
#[get("/{collection}/{id}")]
pub async fn detail(
    request: HttpRequest,
    path: web::Path<(String, i64)>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    get_account(&request, &store)?;
    let (name, id) = path.into_inner();
    let spec = collection(&name)?;
    let record = store.get(spec.path, id)?;
    Ok(respond(StatusCode::OK, "", [(spec.singular, record)]))
}

#[tracing::instrument(skip(request, body, store), fields(user_id = tracing::field::Empty))]
#[put("/{collection}/{id}")]
pub async fn update(
    request: HttpRequest,
    path: web::Path<(String, i64)>,
    body: web::Json<Value>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    check_writer(&request, &store)?;
    let (name, id) = path.into_inner();
    let spec = collection(&name)?;
    let record = store.update(spec.path, id, body.into_inner())?;
    Ok(respond(
        StatusCode::OK,
        format!("{} updated successfully", capitalized(spec.singular)),
        [(spec.singular, record)],
    ))
}

#[tracing::instrument(skip(request, store), fields(user_id = tracing::field::Empty))]
#[delete("/{collection}/{id}")]
pub async fn delete(
    request: HttpRequest,
    path: web::Path<(String, i64)>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let (name, id) = path.into_inner();
    let spec = collection(&name)?;
    // people may clear their own notifications
    if spec.path == "notifications" {
        get_account(&request, &store)?;
    } else {
        check_writer(&request, &store)?;
    }
    let record = store.delete(spec.path, id)?;
    Ok(respond(
        StatusCode::OK,
        format!("{} deleted successfully", capitalized(spec.singular)),
        [(spec.singular, record)],
    ))
}

#[tracing::instrument(skip(request, body, store), fields(user_id = tracing::field::Empty))]
#[post("/{collection}/delete-many")]
pub async fn delete_many(
    request: HttpRequest,
    path: web::Path<String>,
    body: web::Json<Map<String, Value>>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    check_writer(&request, &store)?;
    let spec = collection(&path)?;
    let ids = bulk_items(spec, body.into_inner())?
        .iter()
        .map(|id| {
            id.as_i64().ok_or_else(|| {
                APIError::BadRequest(anyhow::anyhow!("{id} is not an id"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let deleted = store.delete_many(spec.path, &ids)?;
    Ok(respond(
        StatusCode::OK,
        format!("{} {} deleted successfully", deleted.len(), spec.plural),
        [(spec.plural, Value::Array(deleted))],
    ))
}

#[tracing::instrument(skip(request, body, store), fields(user_id = tracing::field::Empty))]
#[post("/{collection}/csv")]
pub async fn import_csv(
    request: HttpRequest,
    path: web::Path<String>,
    body: web::Json<Map<String, Value>>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    check_writer(&request, &store)?;
    let spec = collection(&path)?;
    let rows = bulk_items(spec, body.into_inner())?;
    let created = store.import(spec.path, rows)?;
    tracing::info!(collection = spec.path, count = created.len(), "imported");
    Ok(respond(
        StatusCode::CREATED,
        format!("{} {} imported successfully", created.len(), spec.plural),
        [(spec.plural, Value::Array(created))],
    ))
}

#[tracing::instrument(skip(request, store), fields(user_id = tracing::field::Empty))]
#[get("/{parent}/{id}/{child}")]
pub async fn children(
    request: HttpRequest,
    path: web::Path<(String, i64, String)>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    get_account(&request, &store)?;
    let (parent, id, child) = path.into_inner();
    let child = collection(&child)?;
    let records = store.children(&parent, id, child.path)?;
    Ok(respond(
        StatusCode::OK,
        "",
        [(child.plural, Value::Array(records))],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_envelope_keys() {
        assert_eq!(capitalized("leaveType"), "LeaveType");
        assert_eq!(capitalized(""), "");
    }

    fn account(collection: &'static str, role: Role) -> Account {
        Account {
            user_id: 7,
            collection,
            email: "ops@acme.test".into(),
            password: "secret".into(),
            role,
        }
    }

    #[test]
    fn staff_are_recorded_as_authors_unless_one_is_named() {
        let manager = account("employees", Role::Manager);
        let mut bulk = serde_json::json!([{"name": "a"}, {"name": "b", "assign_by": 2}]);
        stamp_author(&mut bulk, &manager, "assign_by");
        assert_eq!(bulk[0]["assign_by"], 7);
        assert_eq!(bulk[1]["assign_by"], 2);

        let client = account("clients", Role::Client);
        let mut one = serde_json::json!({"title": "kickoff"});
        stamp_author(&mut one, &client, "assigner");
        assert!(one.get("assigner").is_none());
    }
}
