//! Integration tests for the staged dataset upload pipeline.

use resq_rust::services::upload_tracker::{run_upload, UploadStage, UploadTracker};

const GOOD_CSV: &str = "\
type,severity,duration,year,area,population,food,water,shelter,rescue,medical,logistics,comm,rehab,total
Flood,High,15,2019,Odisha Coastal,750000,120000000,60000000,150000000,50000000,90000000,40000000,20000000,70000000,707000000
Cyclone,Critical,10,2020,West Bengal Delta,1200000,300000000,150000000,400000000,200000000,250000000,180000000,75000000,300000000,1855000000";

#[tokio::test(start_paused = true)]
async fn test_upload_reaches_ready_with_record_count() {
    let tracker = UploadTracker::new();
    let job_id = tracker.create_job();

    let records = run_upload(tracker.clone(), job_id.clone(), GOOD_CSV.to_string())
        .await
        .unwrap();
    assert_eq!(records.len(), 2);

    let job = tracker.get_job(&job_id).unwrap();
    assert_eq!(job.stage, UploadStage::Ready);
    assert_eq!(job.progress, 100);
    assert_eq!(job.record_count, Some(2));
    assert!(job.error.is_none());
    assert!(job.completed_at.is_some());
}

#[tokio::test(start_paused = true)]
async fn test_upload_of_header_only_csv_fails_the_job() {
    let tracker = UploadTracker::new();
    let job_id = tracker.create_job();

    let result = run_upload(
        tracker.clone(),
        job_id.clone(),
        "type,severity,duration\n".to_string(),
    )
    .await;
    assert!(result.is_err());

    let job = tracker.get_job(&job_id).unwrap();
    assert_eq!(job.stage, UploadStage::Error);
    assert!(job.error.is_some());
    assert!(job.is_terminal());
}

#[tokio::test(start_paused = true)]
async fn test_upload_log_records_stage_transitions() {
    let tracker = UploadTracker::new();
    let job_id = tracker.create_job();

    run_upload(tracker.clone(), job_id.clone(), GOOD_CSV.to_string())
        .await
        .unwrap();

    let log = tracker.get_log(&job_id);
    assert!(!log.is_empty());
    assert!(log.iter().any(|e| e.stage == UploadStage::Sanitizing));
    assert!(log.iter().any(|e| e.stage == UploadStage::Training));
    assert!(log.iter().any(|e| e.stage == UploadStage::Ready));
}

#[tokio::test]
async fn test_job_lookup_unknown_id_is_none() {
    let tracker = UploadTracker::new();
    assert!(tracker.get_job("no-such-job").is_none());
    assert!(tracker.get_log("no-such-job").is_empty());
}
