use crate::application::use_cases::appearance::stylesheet;
use crate::application::use_cases::export::{export, write_exports, ExportFormat};
use crate::application::{DocumentSession, ExtractionInput};
use crate::domain::document::{ExtractedDocument, Metrics, SourceKind};
use crate::domain::error::AppError;
use crate::domain::theme::{self, ThemePalette, DEFAULT_FONT, DEFAULT_THEME};
use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::{dev::Server, get, post, put, web, App, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

const PREVIEW_CHARS: usize = 1000;
const MAX_LOG_ENTRIES: usize = 100;
// Uploads are held in memory whole
const MAX_UPLOAD_BYTES: usize = 200 * 1024 * 1024;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub session: Arc<DocumentSession>,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
    pub export_dir: PathBuf,
}

#[derive(Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Deserialize)]
pub struct UrlRequest {
    pub url: String,
}

#[derive(Deserialize)]
pub struct ApiKeyRequest {
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub question: String,
}

#[derive(Deserialize)]
pub struct ExportRequest {
    pub formats: Vec<ExportFormat>,
}

#[derive(Deserialize)]
pub struct ThemeQuery {
    pub theme: Option<String>,
    pub font: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentView {
    pub kind: SourceKind,
    pub metrics: Metrics,
    pub preview: String,
}

impl From<&ExtractedDocument> for DocumentView {
    fn from(document: &ExtractedDocument) -> Self {
        Self {
            kind: document.source_kind,
            metrics: document.metrics.clone(),
            preview: document.preview(PREVIEW_CHARS),
        }
    }
}

#[derive(Serialize)]
struct ApiKeyStatus {
    configured: bool,
}

#[derive(Serialize)]
struct ExportResponse {
    files: Vec<String>,
}

#[derive(Serialize)]
struct ThemeView {
    name: &'static str,
    #[serde(flatten)]
    palette: &'static ThemePalette,
}

#[derive(Serialize)]
struct FontView {
    name: &'static str,
    family: &'static str,
}

#[derive(Serialize)]
struct ThemeCatalogue {
    default_theme: &'static str,
    default_font: &'static str,
    themes: Vec<ThemeView>,
    fonts: Vec<FontView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::EmptyInput | AppError::UnreadablePdf(_) | AppError::UnparsableCsv(_) => {
            StatusCode::BAD_REQUEST
        }
        AppError::MissingApiKey => StatusCode::PRECONDITION_FAILED,
        AppError::NoDocument => StatusCode::CONFLICT,
        AppError::FetchError(_) | AppError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
        AppError::ExportError(_) | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(logs: &Mutex<Vec<LogEntry>>, context: &str, err: &AppError) -> HttpResponse {
    add_log(logs, "ERROR", "HttpApi", &format!("{} failed: {}", context, err));
    HttpResponse::build(status_for(err)).json(ErrorBody {
        error: err.user_message(),
    })
}

async fn run_extraction(data: &HttpState, input: ExtractionInput) -> HttpResponse {
    let kind = input.kind();
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!("Extracting {} input ({} bytes)", kind, input.len()),
    );

    match data.session.process(input).await {
        Ok(document) => HttpResponse::Ok().json(DocumentView::from(&document)),
        Err(e) => error_response(&data.logs, &format!("{} extraction", kind), &e),
    }
}

#[post("/extract/text")]
async fn extract_text(data: web::Data<HttpState>, req: web::Json<TextRequest>) -> impl Responder {
    run_extraction(&data, ExtractionInput::Text(req.into_inner().text)).await
}

#[post("/extract/pdf")]
async fn extract_pdf(data: web::Data<HttpState>, body: web::Bytes) -> impl Responder {
    run_extraction(&data, ExtractionInput::Pdf(body.to_vec())).await
}

#[post("/extract/csv")]
async fn extract_csv(data: web::Data<HttpState>, body: web::Bytes) -> impl Responder {
    run_extraction(&data, ExtractionInput::Csv(body.to_vec())).await
}

#[post("/extract/url")]
async fn extract_url(data: web::Data<HttpState>, req: web::Json<UrlRequest>) -> impl Responder {
    run_extraction(&data, ExtractionInput::Url(req.into_inner().url)).await
}

#[get("/document")]
async fn current_document(data: web::Data<HttpState>) -> impl Responder {
    match data.session.current_document() {
        Some(document) => HttpResponse::Ok().json(DocumentView::from(&document)),
        None => HttpResponse::NotFound().json(ErrorBody {
            error: AppError::NoDocument.user_message(),
        }),
    }
}

#[put("/api-key")]
async fn set_api_key(data: web::Data<HttpState>, req: web::Json<ApiKeyRequest>) -> impl Responder {
    data.session.set_api_key(req.into_inner().api_key);
    let configured = data.session.has_api_key();
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!("API key {}", if configured { "configured" } else { "cleared" }),
    );
    HttpResponse::Ok().json(ApiKeyStatus { configured })
}

#[post("/analyze")]
async fn analyze(data: web::Data<HttpState>, req: web::Json<AnalyzeRequest>) -> impl Responder {
    add_log(&data.logs, "INFO", "HttpApi", "Analyzing current document");

    match data.session.analyze(&req.question).await {
        Ok(entry) => HttpResponse::Ok().json(entry),
        Err(e) => error_response(&data.logs, "Analysis", &e),
    }
}

#[get("/history")]
async fn get_history(data: web::Data<HttpState>) -> impl Responder {
    let mut entries = data.session.history();
    entries.reverse();
    HttpResponse::Ok().json(entries)
}

#[get("/stats")]
async fn get_stats(data: web::Data<HttpState>) -> impl Responder {
    HttpResponse::Ok().json(data.session.usage())
}

#[post("/reset")]
async fn reset_session(data: web::Data<HttpState>) -> impl Responder {
    data.session.reset();
    add_log(&data.logs, "INFO", "HttpApi", "Session statistics reset");
    HttpResponse::Ok().json(data.session.usage())
}

#[post("/export")]
async fn export_files(data: web::Data<HttpState>, req: web::Json<ExportRequest>) -> impl Responder {
    let entries = data.session.history();
    match write_exports(&entries, &req.formats, &data.export_dir) {
        Ok(paths) => {
            let files: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
            add_log(
                &data.logs,
                "INFO",
                "HttpApi",
                &format!("Exported {} file(s)", files.len()),
            );
            HttpResponse::Ok().json(ExportResponse { files })
        }
        Err(e) => error_response(&data.logs, "Export", &e),
    }
}

#[get("/export/{format}")]
async fn download_export(data: web::Data<HttpState>, path: web::Path<String>) -> impl Responder {
    let Some(format) = ExportFormat::from_extension(&path) else {
        return HttpResponse::NotFound().json(ErrorBody {
            error: format!("Unknown export format: {}", path.as_str()),
        });
    };

    let entries = data.session.history();
    if entries.is_empty() {
        let err = AppError::ExportError("No history data to export".to_string());
        return error_response(&data.logs, "Export", &err);
    }

    match export(&entries, format) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(format.content_type())
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", format.file_name()),
            ))
            .body(bytes),
        Err(e) => error_response(&data.logs, "Export", &e),
    }
}

#[get("/themes")]
async fn get_themes() -> impl Responder {
    let themes = theme::theme_names()
        .into_iter()
        .map(|name| ThemeView {
            name,
            palette: theme::theme(name),
        })
        .collect();
    let fonts = theme::font_names()
        .into_iter()
        .map(|name| FontView {
            name,
            family: theme::font_family(name),
        })
        .collect();

    HttpResponse::Ok().json(ThemeCatalogue {
        default_theme: DEFAULT_THEME,
        default_font: DEFAULT_FONT,
        themes,
        fonts,
    })
}

#[get("/theme.css")]
async fn theme_css(query: web::Query<ThemeQuery>) -> impl Responder {
    let css = stylesheet(
        query.theme.as_deref().unwrap_or(DEFAULT_THEME),
        query.font.as_deref().unwrap_or(DEFAULT_FONT),
    );
    HttpResponse::Ok().content_type("text/css; charset=utf-8").body(css)
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data.logs.lock().unwrap_or_else(PoisonError::into_inner);
    HttpResponse::Ok().json(&*logs)
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap_or_else(PoisonError::into_inner);
    logs.push(entry.clone());
    if logs.len() > MAX_LOG_ENTRIES {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

/// Routes under `/api`, shared by the server and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
        .app_data(web::JsonConfig::default().limit(MAX_UPLOAD_BYTES))
        .service(
            web::scope("/api")
                .service(extract_text)
                .service(extract_pdf)
                .service(extract_csv)
                .service(extract_url)
                .service(current_document)
                .service(set_api_key)
                .service(analyze)
                .service(get_history)
                .service(get_stats)
                .service(reset_session)
                .service(export_files)
                .service(download_export)
                .service(get_themes)
                .service(theme_css)
                .service(get_logs),
        );
}

pub fn start_server(state: HttpState, host: &str, port: u16) -> std::io::Result<Server> {
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((host, port))?
    .run();

    Ok(server)
}
