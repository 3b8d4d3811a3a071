use crate::command::assert_cmd_snapshot;

fn expand() -> crate::command::Command {
    crate::escala(["recur", "expand"])
}

// N.B. The date arithmetic is tested extensively by unit tests within
// Escala. Here, we focus on how the CLI accepts and reports things.

#[test]
fn weekly() {
    assert_cmd_snapshot!(
        expand().args(["weekly", "-d", "wed", "2024-01-01", "2024-01-31"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-01-03
    2024-01-10
    2024-01-17
    2024-01-24
    2024-01-31

    ----- stderr -----
    ",
    );

    // Flags can come after the positional arguments, weekdays can be given
    // in Portuguese or as an offset from Sunday and a week of the month is
    // ignored.
    assert_cmd_snapshot!(
        expand().args(["semanal", "2024-02-01", "2024-02-29", "-d", "Sábado"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-02-03
    2024-02-10
    2024-02-17
    2024-02-24

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        expand().args(["weekly", "-d6", "-n2", "2024-02-01", "2024-02-29"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-02-03
    2024-02-10
    2024-02-17
    2024-02-24

    ----- stderr -----
    ",
    );
}

#[test]
fn monthly() {
    assert_cmd_snapshot!(
        expand().args([
            "monthly",
            "-d",
            "quarta",
            "-n",
            "2",
            "2024-01-01",
            "2024-03-31",
        ]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-01-10
    2024-02-14
    2024-03-13

    ----- stderr -----
    ",
    );

    // The last Sunday, across a year boundary.
    assert_cmd_snapshot!(
        expand().args([
            "monthly",
            "-d",
            "0",
            "-n",
            "-1",
            "2023-12-01",
            "2024-03-31",
        ]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2023-12-31
    2024-01-28
    2024-02-25
    2024-03-31

    ----- stderr -----
    ",
    );

    // Occurrences before the start of the range are dropped even though
    // part of their month is in range.
    assert_cmd_snapshot!(
        expand().args([
            "monthly",
            "-d",
            "sat",
            "-n",
            "first",
            "2024-01-07",
            "2024-04-06",
        ]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-02-03
    2024-03-02
    2024-04-06

    ----- stderr -----
    ",
    );
}

#[test]
fn single_day_range() {
    assert_cmd_snapshot!(
        expand().args(["weekly", "-d", "wed", "2024-01-03", "2024-01-03"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-01-03

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        expand().args(["weekly", "-d", "thu", "2024-01-03", "2024-01-03"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----

    ----- stderr -----
    ",
    );
}

#[test]
fn end_before_start() {
    assert_cmd_snapshot!(
        expand().args(["weekly", "-d", "wed", "2024-01-31", "2024-01-01"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----

    ----- stderr -----
    ",
    );
}

#[test]
fn datetime_range() {
    assert_cmd_snapshot!(
        expand().args([
            "weekly",
            "-d",
            "fri",
            "2024-03-01T19:30",
            "2024-03-15T08:00",
        ]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-03-01
    2024-03-08
    2024-03-15

    ----- stderr -----
    ",
    );
}

#[test]
fn invalid_rules() {
    assert_cmd_snapshot!(
        expand().args(["monthly", "-d", "wed", "2024-01-01", "2024-03-31"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    invalid recurrence rule: monthly recurrence requires a week of the month
    ",
    );
    assert_cmd_snapshot!(
        expand().args(["weekly", "2024-01-01", "2024-03-31"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    invalid recurrence rule: weekly recurrence requires a day of the week
    ",
    );
    assert_cmd_snapshot!(
        expand().args(["weekly", "-d", "7", "2024-01-01", "2024-03-31"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    invalid recurrence rule: day of the week `7` is not in the range `0..=6` (where `0` is Sunday)
    ",
    );
    assert_cmd_snapshot!(
        expand().args([
            "monthly",
            "-d",
            "wed",
            "-n",
            "5",
            "2024-01-01",
            "2024-03-31",
        ]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    invalid recurrence rule: week of the month `5` is not one of `1`, `2`, `3`, `4` or `-1` (last)
    ",
    );
}

#[test]
fn invalid_arguments() {
    assert_cmd_snapshot!(
        expand().args(["Daily", "-d", "wed", "2024-01-01", "2024-03-31"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    unrecognized frequency: `Daily`
    ",
    );
    assert_cmd_snapshot!(
        expand().args([
            "weekly",
            "-d",
            "SomeDay",
            "2024-01-01",
            "2024-03-31",
        ]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    -d/--day-of-week: unrecognized weekday: `SomeDay`
    ",
    );
    assert_cmd_snapshot!(
        expand().args(["weekly", "-d", "wed", "2024-01-01"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    missing required <end>
    ",
    );
    assert_cmd_snapshot!(
        expand().args(["-d", "wed"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    missing required <frequency>
    ",
    );
}
