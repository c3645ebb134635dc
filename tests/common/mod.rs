use serde_json::{Value, json};

/// Attendance records as returned by the back-office search endpoint.
pub fn attendance_rows() -> Vec<Value> {
    vec![
        json!({"_id": "a1", "employeeId": {"name": "Bob", "code": 7}, "date": "2024-03-04", "minutes": 480, "status": "present"}),
        json!({"_id": "a2", "employeeId": {"name": "Amy", "code": 3}, "date": "2024-03-01", "minutes": 510, "status": "present"}),
        json!({"_id": "a3", "employeeId": null, "date": "2024-03-02", "minutes": 0, "status": "absent"}),
        json!({"_id": "a4", "employeeId": {"name": "Cleo", "code": 11}, "date": "2024-03-03", "minutes": 480, "status": "late"}),
        json!({"_id": "a5", "employeeId": {"name": "Dan", "code": 2}, "date": "2024-03-05T09:15:00Z", "minutes": 455, "status": "late"}),
        json!({"_id": "a6", "employeeId": {"name": "Eve", "code": 5}, "date": "2024-03-05", "minutes": 480, "status": "present"}),
    ]
}

pub fn ids(rows: &[Value]) -> Vec<&str> {
    rows.iter()
        .map(|row| row["_id"].as_str().unwrap_or_default())
        .collect()
}
