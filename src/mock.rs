//! An in-memory stand-in for the election API, served by Rocket on a loopback
//! port, for tests that go over HTTP.
//!
//! It mirrors the real server closely enough for the client: the same routes,
//! bodies and status codes, with candidates, codes and votes held in memory.
//! Tests set it up through the [`MockApi`] handle, which also counts the
//! requests served.

use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr, TcpListener};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use rocket::{
    http::{ContentType, Status},
    serde::json::Json,
    Shutdown, State,
};

use crate::model::{
    api::{Ack, AdminCredentials, GenerateCodesRequest, GeneratedCodes, VerifyCodeRequest},
    common::{
        Candidate, CandidateResult, ElectionResults, ElectionSettings, NewCandidate, Position,
        Voter, VoteSubmission,
    },
};

const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "changeme123";

#[derive(Debug, Default)]
struct MockState {
    candidates: Vec<Candidate>,
    voters: Vec<Voter>,
    votes: HashMap<String, u64>,
    next_id: u64,
    failing: bool,
    requests: usize,
}

impl MockState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn voter_mut(&mut self, code: &str) -> Option<&mut Voter> {
        let code = code.to_uppercase();
        self.voters.iter_mut().find(|voter| voter.code == code)
    }

    fn results(&self) -> Vec<ElectionResults> {
        Position::ALL
            .into_iter()
            .map(|position| ElectionResults {
                position,
                candidates: self
                    .candidates
                    .iter()
                    .filter(|candidate| candidate.position == position)
                    .map(|candidate| CandidateResult {
                        candidate_id: candidate.id.clone(),
                        name: candidate.name.clone(),
                        vote_count: self.votes.get(&candidate.id).copied().unwrap_or(0),
                    })
                    .collect(),
            })
            .collect()
    }

    fn csv(&self) -> String {
        let mut csv = String::from("Position,Rank,Candidate,Votes,Percentage\n");
        for mut result in self.results() {
            result
                .candidates
                .sort_by(|a, b| b.vote_count.cmp(&a.vote_count));
            let total: u64 = result.candidates.iter().map(|c| c.vote_count).sum();
            for (rank, candidate) in result.candidates.iter().enumerate() {
                let percentage = if total > 0 {
                    candidate.vote_count as f64 * 100.0 / total as f64
                } else {
                    0.0
                };
                csv.push_str(&format!(
                    "{},{},{},{},{:.1}%\n",
                    result.position,
                    rank + 1,
                    candidate.name,
                    candidate.vote_count,
                    percentage
                ));
            }
            csv.push('\n');
        }
        csv
    }
}

type SharedState = Arc<Mutex<MockState>>;

/// Count the request and fail it if the server has been told to.
fn serve(state: &SharedState) -> Result<MutexGuard<'_, MockState>, Status> {
    let mut state = state.lock().unwrap();
    state.requests += 1;
    if state.failing {
        return Err(Status::InternalServerError);
    }
    Ok(state)
}

fn ack(success: bool, message: &str) -> Json<Ack> {
    Json(Ack {
        success: Some(success),
        message: Some(message.to_string()),
    })
}

#[rocket::post("/auth/verify", data = "<request>")]
fn verify(state: &State<SharedState>, request: Json<VerifyCodeRequest>) -> Result<Json<Ack>, Status> {
    let mut state = serve(state)?;
    Ok(match state.voter_mut(&request.code) {
        None => ack(false, "Invalid voting code"),
        Some(voter) if voter.has_voted => ack(false, "This code has already been used"),
        Some(_) => ack(true, "Code verified successfully"),
    })
}

#[rocket::get("/candidates")]
fn candidates(state: &State<SharedState>) -> Result<Json<Vec<Candidate>>, Status> {
    Ok(Json(serve(state)?.candidates.clone()))
}

#[rocket::post("/votes/submit", data = "<submission>")]
fn submit(state: &State<SharedState>, submission: Json<VoteSubmission>) -> Result<Json<Ack>, Status> {
    let mut state = serve(state)?;
    match state.voter_mut(&submission.voting_code) {
        Some(voter) if !voter.has_voted => {}
        _ => return Err(Status::BadRequest),
    }
    if submission.votes.len() != Position::COUNT {
        return Err(Status::BadRequest);
    }
    let known = submission.votes.iter().all(|vote| {
        state
            .candidates
            .iter()
            .any(|candidate| candidate.id == vote.candidate_id)
    });
    if !known {
        return Err(Status::BadRequest);
    }

    for vote in &submission.votes {
        let counted = state
            .candidates
            .iter()
            .any(|c| c.id == vote.candidate_id && c.position == vote.position);
        if counted {
            *state.votes.entry(vote.candidate_id.clone()).or_default() += 1;
        }
    }
    if let Some(voter) = state.voter_mut(&submission.voting_code) {
        voter.has_voted = true;
        voter.voted_at = Some(Utc::now().naive_utc());
    }
    Ok(ack(true, "Votes submitted successfully"))
}

#[rocket::get("/votes/results")]
fn results(state: &State<SharedState>) -> Result<Json<Vec<ElectionResults>>, Status> {
    Ok(Json(serve(state)?.results()))
}

#[rocket::get("/election/settings")]
fn settings(state: &State<SharedState>) -> Result<Json<ElectionSettings>, Status> {
    serve(state)?;
    let start_time = Utc::now().naive_utc();
    Ok(Json(ElectionSettings {
        start_time,
        end_time: start_time + ChronoDuration::days(7),
        is_active: true,
    }))
}

#[rocket::post("/admin/login", data = "<credentials>")]
fn admin_login(
    state: &State<SharedState>,
    credentials: Json<AdminCredentials>,
) -> Result<Json<Ack>, Status> {
    serve(state)?;
    Ok(
        if credentials.username == ADMIN_USERNAME && credentials.password == ADMIN_PASSWORD {
            ack(true, "Login successful")
        } else {
            ack(false, "Invalid credentials")
        },
    )
}

#[rocket::get("/admin/voters")]
fn voters(state: &State<SharedState>) -> Result<Json<Vec<Voter>>, Status> {
    Ok(Json(serve(state)?.voters.clone()))
}

#[rocket::post("/admin/candidates", data = "<candidate>")]
fn add_candidate(
    state: &State<SharedState>,
    candidate: Json<NewCandidate>,
) -> Result<Json<Candidate>, Status> {
    let mut state = serve(state)?;
    let candidate = candidate.into_inner();
    let added = Candidate {
        id: state.next_id("candidate"),
        name: candidate.name,
        position: candidate.position,
        bio: candidate.bio,
        photo_url: candidate.photo_url,
    };
    state.candidates.push(added.clone());
    Ok(Json(added))
}

#[rocket::delete("/admin/candidates/<id>")]
fn remove_candidate(state: &State<SharedState>, id: &str) -> Result<Json<Ack>, Status> {
    let mut state = serve(state)?;
    let index = state
        .candidates
        .iter()
        .position(|candidate| candidate.id == id)
        .ok_or(Status::NotFound)?;
    state.candidates.remove(index);
    Ok(ack(true, "Candidate removed"))
}

#[rocket::post("/admin/voters/generate", data = "<request>")]
fn generate(
    state: &State<SharedState>,
    request: Json<GenerateCodesRequest>,
) -> Result<Json<GeneratedCodes>, Status> {
    let mut state = serve(state)?;
    let codes: Vec<String> = (0..request.count)
        .map(|_| {
            let code = format!("CODE{:04}", state.voters.len() + 1);
            let id = state.next_id("voter");
            state.voters.push(Voter {
                id,
                code: code.clone(),
                has_voted: false,
                voted_at: None,
            });
            code
        })
        .collect();
    Ok(Json(GeneratedCodes { codes }))
}

#[rocket::get("/admin/export/csv")]
fn export_csv(state: &State<SharedState>) -> Result<(ContentType, String), Status> {
    Ok((ContentType::CSV, serve(state)?.csv()))
}

#[rocket::get("/admin/export/pdf")]
fn export_pdf(state: &State<SharedState>) -> Result<(ContentType, Vec<u8>), Status> {
    serve(state)?;
    Ok((ContentType::PDF, b"%PDF-1.4\n%%EOF\n".to_vec()))
}

/// Handle on a running mock server.
#[derive(Clone)]
pub struct MockApi {
    url: String,
    state: SharedState,
    shutdown: Shutdown,
}

impl MockApi {
    /// Start a server on a free loopback port and wait until it accepts
    /// connections.
    pub async fn launch() -> Self {
        let port = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .and_then(|listener| listener.local_addr())
            .expect("no free port for the mock API")
            .port();
        let figment = rocket::Config::figment()
            .merge(("address", Ipv4Addr::LOCALHOST))
            .merge(("port", port))
            .merge(("log_level", "off"))
            .merge(("shutdown.ctrlc", false));

        let state = SharedState::default();
        let rocket = rocket::custom(figment)
            .manage(state.clone())
            .mount(
                "/api",
                rocket::routes![
                    verify,
                    candidates,
                    submit,
                    results,
                    settings,
                    admin_login,
                    voters,
                    add_candidate,
                    remove_candidate,
                    generate,
                    export_csv,
                    export_pdf,
                ],
            )
            .ignite()
            .await
            .expect("mock API failed to ignite");
        let shutdown = rocket.shutdown();
        tokio::spawn(rocket.launch());

        let address = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
        while tokio::net::TcpStream::connect(address).await.is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        Self {
            url: format!("http://{address}/api"),
            state,
            shutdown,
        }
    }

    /// Base URL of the API, as an `ApiClient` expects it.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn shutdown(&self) {
        self.shutdown.clone().notify();
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    /// Requests served so far, failed ones included.
    pub fn requests(&self) -> usize {
        self.state().requests
    }

    /// Make every route answer 500 until switched off again.
    pub fn set_failing(&self, failing: bool) {
        self.state().failing = failing;
    }

    /// Add an unused voting code, if it is not already known.
    pub fn issue_code(&self, code: &str) {
        let mut state = self.state();
        if state.voter_mut(code).is_none() {
            let id = state.next_id("voter");
            state.voters.push(Voter {
                id,
                code: code.to_uppercase(),
                has_voted: false,
                voted_at: None,
            });
        }
    }

    pub fn mark_used(&self, code: &str) {
        if let Some(voter) = self.state().voter_mut(code) {
            voter.has_voted = true;
            voter.voted_at = Some(Utc::now().naive_utc());
        }
    }

    pub fn is_used(&self, code: &str) -> bool {
        self.state()
            .voter_mut(code)
            .map_or(false, |voter| voter.has_voted)
    }

    pub fn add_candidate(&self, name: &str, position: Position) -> Candidate {
        let mut state = self.state();
        let candidate = Candidate {
            id: state.next_id("candidate"),
            name: name.to_string(),
            position,
            bio: None,
            photo_url: None,
        };
        state.candidates.push(candidate.clone());
        candidate
    }

    /// One candidate for every position, in ballot order.
    pub fn seed_full_slate(&self) -> Vec<Candidate> {
        const NAMES: [&str; Position::COUNT] = [
            "Adaeze Okafor",
            "Bayo Adeleke",
            "Chidi Nwosu",
            "Funmi Bello",
            "Ibrahim Musa",
            "Kemi Ojo",
            "Tunde Bakare",
        ];
        Position::ALL
            .into_iter()
            .zip(NAMES)
            .map(|(position, name)| self.add_candidate(name, position))
            .collect()
    }

    pub fn record_vote(&self, candidate: &Candidate) {
        *self
            .state()
            .votes
            .entry(candidate.id.clone())
            .or_default() += 1;
    }

    pub fn vote_count(&self, candidate_id: &str) -> u64 {
        self.state().votes.get(candidate_id).copied().unwrap_or(0)
    }

    pub fn candidates(&self) -> Vec<Candidate> {
        self.state().candidates.clone()
    }
}
