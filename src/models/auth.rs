use serde::{Deserialize, Serialize};

/// Sesión de usuario devuelta por login/registro.
/// Todos los campos son obligatorios: un registro parcial no deserializa.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub token: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Cuerpo de error del API (`{ "message": "..." }`)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ApiMessage {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_session_is_rejected() {
        let json = r#"{"_id":"u1","name":"Ram","email":"ram@pasal.np","isAdmin":false}"#;
        assert!(serde_json::from_str::<UserSession>(json).is_err());
    }

    #[test]
    fn session_reads_storefront_names() {
        let json = r#"{"_id":"u1","name":"Ram","email":"ram@pasal.np","isAdmin":true,"token":"t"}"#;
        let user: UserSession = serde_json::from_str(json).unwrap();
        assert!(user.is_admin);
        assert_eq!(user.id, "u1");
    }
}
