mod admin_api;
mod db;
mod models;
mod question_api;
mod vote_api;

use uuid::Uuid;
use warp::Filter;

pub async fn setup(port: u16) {
    // public poll views
    let index = warp::get()
        .and(warp::path!("polls"))
        .map(question_api::index);
    let detail = warp::get()
        .and(warp::path!("polls" / Uuid))
        .map(question_api::detail);
    let results = warp::get()
        .and(warp::path!("polls" / Uuid / "results"))
        .map(question_api::results);
    let vote = warp::post()
        .and(warp::path!("polls" / Uuid / "vote"))
        .and(warp::body::form())
        .map(vote_api::vote);

    // question authoring
    let admin_list = warp::get()
        .and(warp::path!("api" / "admin" / "questions"))
        .and(warp::query::<admin_api::QuestionListQuery>())
        .map(admin_api::list_questions);
    let admin_create = warp::post()
        .and(warp::path!("api" / "admin" / "questions"))
        .and(warp::body::json())
        .map(admin_api::create_question);
    let admin_add_choice = warp::post()
        .and(warp::path!("api" / "admin" / "questions" / Uuid / "choices"))
        .and(warp::body::json())
        .map(admin_api::add_choice);
    let admin_delete = warp::delete()
        .and(warp::path!("api" / "admin" / "questions" / Uuid))
        .map(admin_api::delete_question);

    let routes = index
        .or(detail)
        .or(results)
        .or(vote)
        .or(admin_list)
        .or(admin_create)
        .or(admin_add_choice)
        .or(admin_delete);

    tracing::info!("serving poll application on port {port}");
    warp::serve(routes).run(([0, 0, 0, 0], port)).await;
}
