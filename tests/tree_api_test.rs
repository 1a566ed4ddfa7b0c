mod common;

use axum::http::StatusCode;
use career_guide::models::vacancy::{VacancyPage, VacancyRecord};
use serde_json::{json, Value as JsonValue};

use common::{app, post_json, send, FakeSearch, ScriptedChat};

fn path(len: usize) -> JsonValue {
    let steps: Vec<JsonValue> = (1..=len)
        .map(|i| json!({"question": format!("Q{}", i), "answer": format!("A{}", i)}))
        .collect();
    json!({ "path": steps })
}

#[tokio::test]
async fn first_node_starts_the_tree() {
    let chat = ScriptedChat::new(vec!["Question: Люди или техника?\n1. Люди\n2. Техника"]);
    let app = app(chat.clone(), FakeSearch::empty()).await;

    let (status, body) = send(&app, post_json("/ai-tree/api/node", &json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "question": "Люди или техника?",
            "options": ["Люди", "Техника"],
            "step": 1,
            "end": false
        })
    );
    assert!(chat.requests.lock().unwrap()[0].messages[0]
        .content
        .contains("начало"));
}

#[tokio::test]
async fn tenth_answer_ends_the_tree_without_a_model_call() {
    let chat = ScriptedChat::new(vec![]);
    let app = app(chat.clone(), FakeSearch::empty()).await;

    let (status, body) = send(&app, post_json("/ai-tree/api/node", &path(10))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["end"], true);
    assert_eq!(body["question"], JsonValue::Null);
    assert_eq!(body["options"], json!([]));
    assert_eq!(chat.calls(), 0);
}

#[tokio::test]
async fn unparseable_reply_still_offers_two_options() {
    let chat = ScriptedChat::new(vec!["Sorry, I cannot help with that."]);
    let app = app(chat, FakeSearch::empty()).await;

    let (status, body) = send(&app, post_json("/ai-tree/api/node", &path(3))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step"], 4);
    assert_eq!(body["options"].as_array().unwrap().len(), 2);
    assert!(!body["question"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn result_returns_reply_and_search_label() {
    let chat = ScriptedChat::new(vec![
        "Profession: Веб-дизайнер. Вы выбирали творчество и работу за компьютером.",
    ]);
    let app = app(chat.clone(), FakeSearch::empty()).await;

    let (status, body) = send(&app, post_json("/ai-tree/api/result", &path(10))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "Веб-дизайнер");
    assert!(body["profession"]
        .as_str()
        .unwrap()
        .starts_with("Profession: Веб-дизайнер"));
    let prompt = chat.requests.lock().unwrap()[0].messages[0].content.clone();
    assert!(prompt.contains("10) Question: Q10 — Answer: A10"));
}

#[tokio::test]
async fn result_for_empty_path_is_bad_request() {
    let chat = ScriptedChat::new(vec![]);
    let app = app(chat.clone(), FakeSearch::empty()).await;

    let (status, body) = send(&app, post_json("/ai-tree/api/result", &json!({"path": []}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(chat.calls(), 0);
}

#[tokio::test]
async fn vacancies_fall_back_through_regions() {
    let search = FakeSearch::new(|query| {
        if query.region_id == 159 {
            Ok(VacancyPage {
                items: vec![VacancyRecord {
                    title: "Junior Web Designer".into(),
                    employer_name: Some("Kaspi".into()),
                    salary_from: Some(250_000),
                    salary_to: Some(400_000),
                    currency: Some("KZT".into()),
                    required_skills: vec![],
                    url: Some("https://hh.kz/vacancy/1".into()),
                }],
                found: 1,
            })
        } else {
            Ok(VacancyPage::default())
        }
    });
    let app = app(ScriptedChat::new(vec![]), search.clone()).await;

    let (status, body) = send(
        &app,
        post_json(
            "/ai-tree/api/vacancies",
            &json!({"profession": "Profession: Веб-дизайнер. Творческая работа"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["vacancies"],
        json!([{
            "name": "Junior Web Designer",
            "company": "Kaspi",
            "url": "https://hh.kz/vacancy/1",
            "salary": "250000–400000 KZT"
        }])
    );

    let regions: Vec<u32> = search.recorded().iter().map(|q| q.region_id).collect();
    assert_eq!(regions, vec![40, 113, 159]);
    assert!(search.recorded().iter().all(|q| q.profession == "Веб-дизайнер"));
}

#[tokio::test]
async fn vacancies_for_blank_profession_are_empty() {
    let search = FakeSearch::empty();
    let app = app(ScriptedChat::new(vec![]), search.clone()).await;

    let (status, body) = send(&app, post_json("/ai-tree/api/vacancies", &json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"vacancies": []}));
    assert!(search.recorded().is_empty());
}
