use crate::db::UserId;
use crate::error::IntakeError;

/// The user ids ticked on the admin page.
///
/// A form posts `id` once per checked box, so the body holds a single id or
/// several. No checked box yields an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminSelection {
    Single(UserId),
    List(Vec<UserId>),
}

impl AdminSelection {
    /// Parse every `id` pair of an urlencoded form body.
    pub fn from_form_body(body: &[u8]) -> Result<Self, IntakeError> {
        let ids = url::form_urlencoded::parse(body)
            .filter(|(k, _)| k == "id")
            .map(|(_, v)| {
                v.trim()
                    .parse::<UserId>()
                    .map_err(|_| IntakeError::BadRequest(format!("invalid user id `{v}`")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(match ids.as_slice() {
            [id] => AdminSelection::Single(*id),
            _ => AdminSelection::List(ids),
        })
    }

    pub fn ids(&self) -> &[UserId] {
        match self {
            AdminSelection::Single(id) => std::slice::from_ref(id),
            AdminSelection::List(ids) => ids,
        }
    }
}
