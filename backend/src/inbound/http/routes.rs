//! Route table of the console.

use actix_web::web;

use super::users::{
    create_user, create_user_form, delete_user, delete_user_confirm, edit_user_form, list_users,
    quick_edit_user, root, update_user, user_detail,
};

/// Register every console route.
///
/// `create` is registered ahead of the numeric `{id}` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(root)
        .service(list_users)
        .service(create_user_form)
        .service(create_user)
        .service(user_detail)
        .service(edit_user_form)
        .service(update_user)
        .service(delete_user_confirm)
        .service(delete_user)
        .service(quick_edit_user);
}
