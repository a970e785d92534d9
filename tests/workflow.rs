use notemaster::api::NotemasterApi;
use notemaster::commands::MessageLevel;
use notemaster::llm::stub::StubClient;
use notemaster::store::fs_backend::FsBackend;
use notemaster::store::stats::get_note_stats;

const GENERATED: &str = r#"```json
[
  {"text": "What do plants convert light into?", "reponse": "Chemical energy"},
  {"text": "Where does photosynthesis happen?", "reponse": "In the chloroplasts"}
]
```"#;

fn api_with(stub: StubClient) -> (tempfile::TempDir, NotemasterApi<FsBackend, StubClient>) {
    let dir = tempfile::tempdir().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    let dotfile = dir.path().join(".env");
    (dir, NotemasterApi::new(backend, stub, dotfile, None))
}

#[test]
fn study_session_from_note_to_score_history() {
    let (dir, api) = api_with(StubClient::replies([GENERATED, "the score is {'score': 4}"]));

    let created = api
        .create_note("Photosynthesis", "Plants convert light to energy.")
        .unwrap();
    assert_eq!(created.messages[0].level, MessageLevel::Success);

    let generated = api.generate_questions("Photosynthesis").unwrap();
    assert_eq!(generated.questions.len(), 2);
    assert!(dir.path().join("questions/Photosynthesis.json").is_file());

    let answered = api
        .answer_question("Photosynthesis", 1, "energy")
        .unwrap();
    assert_eq!(answered.evaluation.unwrap().score.value(), 4);
    assert!(answered
        .messages
        .iter()
        .any(|m| m.content.contains("Chemical energy")));

    let stats = get_note_stats(api.backend(), "Photosynthesis").unwrap();
    assert_eq!(stats.attempts.len(), 1);
    assert_eq!(stats.attempts[0].correct_answer, "Chemical energy");
    assert_eq!(stats.attempts[0].user_answer, "energy");
}

#[test]
fn regenerating_replaces_the_question_set() {
    let (_dir, api) = api_with(StubClient::replies([
        GENERATED,
        r#"[{"text": "One more?", "reponse": "Yes"}]"#,
    ]));
    api.create_note("Photosynthesis", "Plants.").unwrap();

    api.generate_questions("Photosynthesis").unwrap();
    api.generate_questions("Photosynthesis").unwrap();

    let listed = api.list_questions("Photosynthesis").unwrap();
    assert_eq!(listed.questions.len(), 1);
    assert_eq!(listed.questions[0].text, "One more?");
}

#[test]
fn service_outage_leaves_no_trace() {
    let (dir, api) = api_with(StubClient::failing("connection refused"));
    api.create_note("Photosynthesis", "Plants.").unwrap();

    let generated = api.generate_questions("Photosynthesis").unwrap();
    assert!(generated.questions.is_empty());
    assert_eq!(generated.messages[0].level, MessageLevel::Error);
    assert!(!dir.path().join("questions").exists());
}

#[test]
fn photosynthesis_scenario_through_the_core_functions() {
    use notemaster::evaluator::evaluate_answer;
    use notemaster::generator::generate_questions;
    use notemaster::store::notes::{load_notes, save_note};
    use notemaster::store::stats::save_quiz_result;

    let dir = tempfile::tempdir().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    save_note(&backend, "Photosynthesis", "Plants convert light to energy.").unwrap();
    let note = load_notes(&backend)
        .unwrap()
        .into_iter()
        .find(|n| n.title == "Photosynthesis")
        .unwrap();

    let reply = r#"[{"text":"What do plants convert?","reponse":"light to energy"}]"#;
    let stub = StubClient::replies([reply, r#"{"score": 4}"#]);

    let set = generate_questions(&backend, &stub, &note.title, &note.content);
    let on_disk: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("questions/Photosynthesis.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(on_disk, serde_json::from_str::<serde_json::Value>(reply).unwrap());

    let question = &set.questions()[0];
    let evaluation = evaluate_answer(
        &stub,
        &question.text,
        "they convert light into energy",
        &question.reponse,
    );
    assert!(evaluation.score.value() <= 5);

    save_quiz_result(
        &backend,
        "Photosynthesis",
        &question.text,
        "they convert light into energy",
        &question.reponse,
        evaluation.score,
    )
    .unwrap();
    let stats = get_note_stats(&backend, "Photosynthesis").unwrap();
    assert_eq!(stats.attempts.len(), 1);
    assert_eq!(stats.attempts[0].score, evaluation.score);
}
