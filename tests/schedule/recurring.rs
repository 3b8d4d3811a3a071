use crate::command::assert_cmd_snapshot;

fn recurring() -> crate::command::Command {
    crate::escala(["schedule", "recurring"])
}

#[test]
fn weekly() {
    assert_cmd_snapshot!(
        recurring().args([
            "weekly",
            "-d",
            "dom",
            "2024-06-01",
            "2024-06-30",
            "-t",
            "19:30",
            "-p",
            "ana:vocal",
        ]),
        @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    {"date":"2024-06-02","time":"19:30:00","recurrence_type":"RECURRING","recurrence":"Todo Domingo","participants":[{"participant":"ana","instrument":"vocal"}]}
    {"date":"2024-06-09","time":"19:30:00","recurrence_type":"RECURRING","recurrence":"Todo Domingo","participants":[{"participant":"ana","instrument":"vocal"}]}
    {"date":"2024-06-16","time":"19:30:00","recurrence_type":"RECURRING","recurrence":"Todo Domingo","participants":[{"participant":"ana","instrument":"vocal"}]}
    {"date":"2024-06-23","time":"19:30:00","recurrence_type":"RECURRING","recurrence":"Todo Domingo","participants":[{"participant":"ana","instrument":"vocal"}]}
    {"date":"2024-06-30","time":"19:30:00","recurrence_type":"RECURRING","recurrence":"Todo Domingo","participants":[{"participant":"ana","instrument":"vocal"}]}

    ----- stderr -----
    "#,
    );
}

#[test]
fn monthly() {
    assert_cmd_snapshot!(
        recurring().args([
            "monthly",
            "-d",
            "fri",
            "-n",
            "last",
            "2024-01-01",
            "2024-02-29",
            "-t",
            "20:00",
            "-p",
            "bia:keyboard",
            "--notes",
            "culto",
        ]),
        @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    {"date":"2024-01-26","time":"20:00:00","recurrence_type":"RECURRING","recurrence":"Toda última Sexta-feira do mês","notes":"culto","participants":[{"participant":"bia","instrument":"keyboard"}]}
    {"date":"2024-02-23","time":"20:00:00","recurrence_type":"RECURRING","recurrence":"Toda última Sexta-feira do mês","notes":"culto","participants":[{"participant":"bia","instrument":"keyboard"}]}

    ----- stderr -----
    "#,
    );

    assert_cmd_snapshot!(
        recurring().args([
            "monthly",
            "-d",
            "fri",
            "-n",
            "last",
            "2024-01-01",
            "2024-02-29",
            "-t",
            "20:00",
            "-p",
            "bia:keyboard",
            "--locale",
            "en",
        ]),
        @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    {"date":"2024-01-26","time":"20:00:00","recurrence_type":"RECURRING","recurrence":"Every last Friday of the month","participants":[{"participant":"bia","instrument":"keyboard"}]}
    {"date":"2024-02-23","time":"20:00:00","recurrence_type":"RECURRING","recurrence":"Every last Friday of the month","participants":[{"participant":"bia","instrument":"keyboard"}]}

    ----- stderr -----
    "#,
    );
}

#[test]
fn no_occurrences() {
    assert_cmd_snapshot!(
        recurring().args([
            "weekly",
            "-d",
            "thu",
            "2024-01-01",
            "2024-01-03",
            "-t",
            "19:30",
            "-p",
            "ana:vocal",
        ]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----

    ----- stderr -----
    ",
    );
}

#[test]
fn end_must_follow_start() {
    assert_cmd_snapshot!(
        recurring().args([
            "weekly",
            "-d",
            "wed",
            "2024-01-03",
            "2024-01-03",
            "-t",
            "19:30",
            "-p",
            "ana:vocal",
        ]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    end date must be after start date (got start `2024-01-03` and end `2024-01-03`)
    ",
    );
}

#[test]
fn invalid() {
    // Nothing is printed when the rule is invalid.
    assert_cmd_snapshot!(
        recurring().args([
            "monthly",
            "-d",
            "wed",
            "2024-01-01",
            "2024-03-31",
            "-t",
            "19:30",
            "-p",
            "ana:vocal",
        ]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    invalid recurrence rule: monthly recurrence requires a week of the month
    ",
    );
    assert_cmd_snapshot!(
        recurring().args([
            "weekly",
            "-d",
            "wed",
            "2024-01-01",
            "2024-03-31",
            "-t",
            "19:30",
        ]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    at least one participant is required
    ",
    );
}
