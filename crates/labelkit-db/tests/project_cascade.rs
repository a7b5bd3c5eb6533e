//! Deleting a project removes every row it owns, on an on-disk database.

use labelkit_core::domain::{
    EvalResult, NewDatasetFile, NewEvalDetail, NewLabel, NewProject, NewPromptEvaluation,
    UploadType,
};
use labelkit_db::{CoreFactory, setup_database};

#[tokio::test]
async fn test_project_delete_cascades() {
    let dir = tempfile::tempdir().unwrap();
    let pool = setup_database(&dir.path().join("labelkit.db")).await.unwrap();
    let repos = CoreFactory::build_repos(pool);

    let project = repos
        .projects
        .insert(&NewProject {
            name: "nuts".to_string(),
            description: None,
        })
        .await
        .unwrap();
    repos
        .labels
        .insert(&NewLabel {
            project_id: project.id,
            name: "pass".to_string(),
        })
        .await
        .unwrap();
    let file = repos
        .files
        .insert(&NewDatasetFile {
            project_id: project.id,
            file_name: "k-a.png".to_string(),
            original_name: "a.png".to_string(),
            mime_type: None,
            size: 1,
            human_label: Some("pass".to_string()),
            upload_type: UploadType::Manual,
        })
        .await
        .unwrap();
    let run = repos
        .evaluations
        .insert_run(&NewPromptEvaluation {
            project_id: project.id,
            prompt_id: 1,
            spec_id: 1,
            final_prompt: "p".to_string(),
        })
        .await
        .unwrap();
    repos
        .evaluations
        .insert_detail(&NewEvalDetail {
            file_id: file.id,
            prompt_eval_id: run.id,
            llm_label: "pass".to_string(),
            llm_reason: "ok".to_string(),
            result: EvalResult::Correct,
        })
        .await
        .unwrap();

    repos.projects.delete(project.id).await.unwrap();

    assert!(repos.labels.list_for_project(project.id).await.unwrap().is_empty());
    assert!(repos.files.get(file.id).await.is_err());
    assert!(!repos.evaluations.run_exists(run.id).await.unwrap());
    assert!(repos.evaluations.list_details(run.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("labelkit.db");

    let id = {
        let pool = setup_database(&path).await.unwrap();
        let repos = CoreFactory::build_repos(pool.clone());
        let project = repos
            .projects
            .insert(&NewProject {
                name: "kept".to_string(),
                description: Some("on disk".to_string()),
            })
            .await
            .unwrap();
        pool.close().await;
        project.id
    };

    let repos = CoreFactory::build_repos(setup_database(&path).await.unwrap());
    let project = repos.projects.get(id).await.unwrap();
    assert_eq!(project.name, "kept");
}
