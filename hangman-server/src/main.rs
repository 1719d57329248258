use std::{
    fs, io,
    sync::{Mutex, MutexGuard},
};

use actix_web::{
    http::StatusCode,
    middleware::Logger,
    web::{self, Data},
    App, HttpServer, Responder, ResponseError,
};
use clap::Parser;
use hangman::{CreateRoundResponse, Recorder, Round, RoundResponse, Turn, UpdateRoundRequest};
use hashbrown::HashMap;
use log::{info, trace};
use rand::{seq::SliceRandom, Rng};
use squirrel_rng::SquirrelRng;
use uuid::Uuid;

type Result<T, E = Error> = std::result::Result<T, E>;

const DEFAULT_WORDS: &[&str] = &[
    "node",
    "javascript",
    "react",
    "miami",
    "paris",
    "amsterdam",
    "lisboa",
];

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("round not found for id {0}")]
    RoundNotFound(Uuid),
    #[error("a key press must be exactly one character - {0:?} is not valid")]
    IllegalKey(String),
    #[error("no words to choose from")]
    NoWords,
    #[error(transparent)]
    Word(#[from] hangman::Error),
    #[error("round table lock was poisoned")]
    Poisoned,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::RoundNotFound(_) => StatusCode::NOT_FOUND,
            Error::IllegalKey(_) => StatusCode::BAD_REQUEST,
            Error::NoWords | Error::Word(_) | Error::Poisoned => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Clone, Debug, Parser)]
struct Args {
    /// path to word list, one word per line (defaults to a built-in list)
    path: Option<String>,

    /// address to listen on
    #[clap(long, default_value = "127.0.0.1")]
    host: String,

    /// port to listen on
    #[clap(short, long, default_value_t = 8080)]
    port: u16,
}

type Rounds = (SquirrelRng, HashMap<Uuid, Round>);

struct AppStateWithRounds {
    shared: Mutex<Rounds>,
    word_list: Vec<String>,
}

impl AppStateWithRounds {
    fn new(rng: SquirrelRng, word_list: Vec<String>) -> Self {
        Self {
            shared: Mutex::new((rng, HashMap::new())),
            word_list,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Rounds>> {
        self.shared.lock().map_err(|_| Error::Poisoned)
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let args = Args::parse();

    let word_list = match &args.path {
        Some(path) => read_words(path)?,
        None => DEFAULT_WORDS.iter().map(|&word| word.to_owned()).collect(),
    };
    info!("loaded {} words", word_list.len());

    let data = Data::new(AppStateWithRounds::new(SquirrelRng::new(), word_list));

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(data.clone())
            .configure(routes)
    })
    .bind((args.host.as_str(), args.port))?
    .run()
    .await
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(create_round))
        .route("/{round}", web::get().to(read_round))
        .route("/{round}", web::put().to(update_round));
}

async fn create_round(data: Data<AppStateWithRounds>) -> Result<impl Responder> {
    let mut state = data.lock()?;

    let round = build_round(&data.word_list, &mut state.0)?;
    let id = Uuid::new_v4();
    trace!("round {id} secret word: {}", round.game().word());

    let mut draw = Recorder::new();
    round.redraw(&mut draw);
    let response = CreateRoundResponse::new(id, &round, draw);

    state.1.insert(id, round);
    info!("created round {id}");

    Ok(web::Json(response))
}

async fn read_round(
    id: web::Path<Uuid>,
    data: Data<AppStateWithRounds>,
) -> Result<impl Responder> {
    let id = id.into_inner();
    let state = data.lock()?;
    let round = state.1.get(&id).ok_or(Error::RoundNotFound(id))?;

    let mut draw = Recorder::new();
    round.redraw(&mut draw);

    Ok(web::Json(RoundResponse::new(round, draw)))
}

async fn update_round(
    id: web::Path<Uuid>,
    request: web::Json<UpdateRoundRequest>,
    data: Data<AppStateWithRounds>,
) -> Result<impl Responder> {
    // Anything other than a single character is a malformed request rather than a key press.
    // Non-letters and repeats are the round's business and come back as ignored.

    let UpdateRoundRequest { letter } = request.into_inner();
    let key = single_key(&letter).ok_or(Error::IllegalKey(letter))?;

    let id = id.into_inner();
    let mut state = data.lock()?;
    let round = state.1.get_mut(&id).ok_or(Error::RoundNotFound(id))?;

    let mut draw = Recorder::new();
    let turn = round.press(key, &mut draw);
    let response = RoundResponse::turn(round, turn, draw);

    // Decided rounds are dropped once their final response is built.
    match turn {
        Turn::Won | Turn::Lost => {
            state.1.remove(&id);
            info!("round {id} {:?}", response.result);
        }
        Turn::Continue | Turn::Ignored(_) => {}
    }

    Ok(web::Json(response))
}

fn single_key(letter: &str) -> Option<char> {
    let mut chars = letter.chars();
    match (chars.next(), chars.next()) {
        (Some(key), None) => Some(key),
        _ => None,
    }
}

fn build_round(words: &[String], rng: &mut impl Rng) -> Result<Round> {
    let word = words.choose(rng).ok_or(Error::NoWords)?;
    Ok(Round::new(word.as_str())?)
}

fn read_words(path: &str) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    let words = parse_words(&text);
    if words.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("no playable words in {path}"),
        ));
    }
    Ok(words)
}

fn parse_words(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|word| !word.is_empty() && word.bytes().all(|u| u.is_ascii_alphabetic()))
        .map(|word| word.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use actix_web::test as actix_test;
    use hangman::{Command, Ignored, RoundResult, ERROR_BUDGET};

    use super::*;

    fn state(words: &[&str]) -> Data<AppStateWithRounds> {
        Data::new(AppStateWithRounds::new(
            SquirrelRng::with_seed(3408509824),
            words.iter().map(|&word| word.to_owned()).collect(),
        ))
    }

    fn press(id: Uuid, letter: &str) -> actix_test::TestRequest {
        actix_test::TestRequest::put()
            .uri(&format!("/{id}"))
            .set_json(UpdateRoundRequest {
                letter: letter.into(),
            })
    }

    #[actix_web::test]
    async fn create_round_draws_blank_board() {
        let app = actix_test::init_service(
            App::new().app_data(state(&["cat"])).configure(routes),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/").to_request();
        let created: CreateRoundResponse = actix_test::call_and_read_body_json(&app, req).await;

        assert_eq!(created.word, "___");
        assert_eq!(created.errors_left, ERROR_BUDGET);
        let blanks = created
            .draw
            .iter()
            .filter(|command| matches!(command, Command::StrokeLine { .. }))
            .count();
        assert_eq!(blanks, 3);
    }

    #[actix_web::test]
    async fn playing_a_round_to_victory() {
        let app = actix_test::init_service(
            App::new().app_data(state(&["cat"])).configure(routes),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/").to_request();
        let CreateRoundResponse { id, .. } = actix_test::call_and_read_body_json(&app, req).await;

        let req = press(id, "C").to_request();
        let update: RoundResponse = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(update.word, "c__");
        assert_eq!(update.result, RoundResult::InProgress);
        assert_eq!(update.draw.len(), 1);

        let req = press(id, "x").to_request();
        let update: RoundResponse = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(update.errors_left, ERROR_BUDGET - 1);
        assert_eq!(update.wrong, "x");

        actix_test::call_service(&app, press(id, "a").to_request()).await;
        let req = press(id, "t").to_request();
        let update: RoundResponse = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(update.result, RoundResult::Won);
        assert_eq!(update.word, "cat");
    }

    #[actix_web::test]
    async fn ignored_keys_come_back_without_drawing() {
        let app = actix_test::init_service(
            App::new().app_data(state(&["cat"])).configure(routes),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/").to_request();
        let CreateRoundResponse { id, .. } = actix_test::call_and_read_body_json(&app, req).await;

        let req = press(id, "7").to_request();
        let update: RoundResponse = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(update.ignored, Some(Ignored::NotALetter));
        assert!(update.draw.is_empty());

        actix_test::call_service(&app, press(id, "q").to_request()).await;
        let req = press(id, "q").to_request();
        let update: RoundResponse = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(update.ignored, Some(Ignored::AlreadyGuessed));
        assert_eq!(update.errors_left, ERROR_BUDGET - 1);
    }

    #[actix_web::test]
    async fn read_round_redraws_everything() {
        let app = actix_test::init_service(
            App::new().app_data(state(&["paris"])).configure(routes),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/").to_request();
        let CreateRoundResponse { id, .. } = actix_test::call_and_read_body_json(&app, req).await;
        actix_test::call_service(&app, press(id, "z").to_request()).await;

        let req = actix_test::TestRequest::get().uri(&format!("/{id}")).to_request();
        let round: RoundResponse = actix_test::call_and_read_body_json(&app, req).await;

        assert_eq!(round.wrong, "z");
        assert!(round.draw.contains(&Command::FillText {
            text: "z".into(),
            x: 500.0,
            y: 100.0,
        }));
        assert!(round
            .draw
            .iter()
            .any(|command| matches!(command, Command::StrokeLine { .. })));
    }

    #[actix_web::test]
    async fn bad_requests() {
        let app = actix_test::init_service(
            App::new().app_data(state(&["cat"])).configure(routes),
        )
        .await;

        let req = press(Uuid::new_v4(), "c").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = actix_test::TestRequest::get().uri("/").to_request();
        let CreateRoundResponse { id, .. } = actix_test::call_and_read_body_json(&app, req).await;

        let req = press(id, "ca").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let req = press(id, "").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn empty_word_list_fails_round_creation() {
        let app = actix_test::init_service(
            App::new().app_data(state(&[])).configure(routes),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn decided_rounds_leave_the_table() {
        let app = actix_test::init_service(
            App::new().app_data(state(&["a"])).configure(routes),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/").to_request();
        let CreateRoundResponse { id, .. } =
            actix_test::call_and_read_body_json(&app, req).await;

        let req = press(id, "a").to_request();
        let update: RoundResponse = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(update.result, RoundResult::Won);
        assert_eq!(update.word, "a");

        let req = actix_test::TestRequest::get().uri(&format!("/{id}")).to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = press(id, "b").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn parse_words_keeps_plain_words() {
        let words = parse_words("Node\n  paris \n\nice cream\nr2d2\nLisboa\r\n");
        assert_eq!(words, ["node", "paris", "lisboa"]);
    }

    #[test]
    fn single_key_requires_one_character() {
        assert_eq!(single_key("a"), Some('a'));
        assert_eq!(single_key("é"), Some('é'));
        assert_eq!(single_key(""), None);
        assert_eq!(single_key("ab"), None);
    }
}
