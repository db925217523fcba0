use backlog_core::Notification;
use serde::Serialize;

#[derive(Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    pub api_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notifications: Vec<Notification>,
}

#[derive(Serialize)]
pub struct ListResponse<T: Serialize> {
    pub items: Vec<T>,
    pub count: usize,
}

fn render<T: Serialize>(response: &CliResponse<T>) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        format!(
            r#"{{"success":false,"error":"failed to encode response: {}"}}"#,
            e
        )
    })
}

pub fn output_success<T: Serialize>(data: T, notifications: Vec<Notification>) {
    let response = CliResponse {
        success: true,
        api_version: env!("CARGO_PKG_VERSION"),
        data: Some(data),
        error: None,
        notifications,
    };
    println!("{}", render(&response));
}

pub fn output_list<T: Serialize>(items: Vec<T>, notifications: Vec<Notification>) {
    let count = items.len();
    output_success(ListResponse { items, count }, notifications);
}

/// Print an error envelope to stderr and exit with status 1.
pub fn output_error(message: &str, notifications: Vec<Notification>) -> ! {
    let response: CliResponse<()> = CliResponse {
        success: false,
        api_version: env!("CARGO_PKG_VERSION"),
        data: None,
        error: Some(message.to_string()),
        notifications,
    };
    eprintln!("{}", render(&response));
    std::process::exit(1);
}
