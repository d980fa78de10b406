use errkit_migrate::rule::Rule;
use errkit_migrate::{CallRewriter, LineOutcome, MigrateConfig, ReviewReason, Strictness};
use errkit_migrate::conversions::error_calls::ErrorCallsRule;

fn rewrite(line: &str) -> LineOutcome {
    CallRewriter::new(&MigrateConfig::default()).rewrite_line(line)
}

fn assert_rewrites(input: &str, expected: &str) {
    assert_eq!(
        rewrite(input),
        LineOutcome::Rewritten(expected.to_string()),
        "input: {input}"
    );
}

#[test]
fn test_wrap_family() {
    let cases = [
        (
            r#"return errors.Wrap(err, "Failed to get Kopia API server secrets")"#,
            r#"return errkit.Wrap(err, "Failed to get Kopia API server secrets")"#,
        ),
        (
            r#"return errors.Wrap(err, "Failed to get PV %s", pvName)"#,
            r#"return errkit.Wrap(err, "Failed to get PV", "PV", pvName)"#,
        ),
        (
            r#"return errors.Wrapf(err, "Failed to get PV %s", pvName)"#,
            r#"return errkit.Wrap(err, "Failed to get PV", "PV", pvName)"#,
        ),
        (
            r#"return errors.Wrap(err, "failed to read env from dir:" + dir)"#,
            r#"return errkit.Wrap(err, "failed to read env from dir", "dir", dir)"#,
        ),
        (
            r#"return nil, errors.Wrapf(err, "Failed to uninstall %s helm release", cb.chart.Release)"#,
            r#"return nil, errkit.Wrap(err, "Failed to uninstall helm release", "release", cb.chart.Release)"#,
        ),
        (
            r#"return errors.Wrapf(err, "Failed to validate if PVC %s:%s exists", namespace, name)"#,
            r#"return errkit.Wrap(err, "Failed to validate if PVC exists", "namespace", namespace, "name", name)"#,
        ),
        (
            r#"return errors.Wrapf(err, "Failed to find VolumeSnapshot: %s/%s", opts.Namespace, opts.GenerateName)"#,
            r#"return errkit.Wrap(err, "Failed to find VolumeSnapshot", "namespace", opts.Namespace, "generateName", opts.GenerateName)"#,
        ),
        (
            r#"return errors.Wrapf(err, "Operation failed. PVC %s/%s not found", opts.Namespace, opts.PVCName)"#,
            r#"return errkit.Wrap(err, "Operation failed. PVC not found", "namespace", opts.Namespace, "PVCName", opts.PVCName)"#,
        ),
        (
            r#"return errors.Wrapf(err, "Failed to find volume with ID %s", id)"#,
            r#"return errkit.Wrap(err, "Failed to find volume with ID", "volumeID", id)"#,
        ),
    ];

    for (input, expected) in cases {
        assert_rewrites(input, expected);
    }
}

#[test]
fn test_new_family() {
    assert_rewrites(
        r#"return errors.New("Failed to get source")"#,
        r#"return errkit.New("Failed to get source")"#,
    );
    assert_rewrites(
        r#"return errors.Errorf("Pod %s failed. Pod status: %s", name, p.Status.String())"#,
        r#"return errkit.New(fmt.Sprintf("Pod %s failed. Pod status: %s", name, p.Status.String()))"#,
    );
    assert_rewrites(
        r#"return errors.Errorf("Unsupported volume type %s", t)"#,
        r#"return errkit.New("Unsupported volume type", "volumeType", t)"#,
    );
    assert_rewrites(
        r#"err := errors.New("invalid bucket:" + bucket.Name)"#,
        r#"err := errkit.New("invalid bucket", "bucket", bucket.Name)"#,
    );
}

#[test]
fn test_nested_call_arguments_are_kept_verbatim() {
    assert_rewrites(
        r#"return errors.Wrap(err, fmt.Sprintf("Error fetching secret %s from namespace %s", ref.Name, ref.Namespace))"#,
        r#"return errkit.Wrap(err, fmt.Sprintf("Error fetching secret %s from namespace %s", ref.Name, ref.Namespace))"#,
    );
}

#[test]
fn test_manual_review() {
    assert_eq!(
        rewrite(r#"return errors.Wrapf(err, "%s %s", errAccessingNode, n[0])"#),
        LineOutcome::NeedsReview(ReviewReason::Declined("Wrapf".to_string()))
    );
    assert_eq!(
        rewrite(r#"return errors.Wrapf(err, "Error encountered. Namespace%s, ServiceName %s", ns, svc)"#),
        LineOutcome::NeedsReview(ReviewReason::Declined("Wrapf".to_string()))
    );
    assert_eq!(
        rewrite(r#"return errors.Wrapf(err, "copy %s to %s in %s", a, b, c)"#),
        LineOutcome::NeedsReview(ReviewReason::Declined("Wrapf".to_string()))
    );
    assert_eq!(
        rewrite("if errors.Is(err, ErrNotFound) {"),
        LineOutcome::NeedsReview(ReviewReason::UnknownCallee("Is".to_string()))
    );
}

#[test]
fn test_lenient_fallback() {
    let config = MigrateConfig {
        strictness: Strictness::Lenient,
        ..MigrateConfig::default()
    };
    let rule = ErrorCallsRule::new(&config);
    assert_eq!(
        rule.rewrite_line(r#"return errors.Wrapf(err, "copy %s to %s in %s", a, b, c)"#),
        LineOutcome::Rewritten(
            r#"return errkit.Wrap(err, fmt.Sprintf("copy %s to %s in %s", a, b, c))"#.to_string()
        )
    );
}

#[test]
fn test_lines_left_alone() {
    for line in [
        r#"return fmt.Errorf("failed: %w", err)"#,
        r#"log.Println("errors.New(x) is deprecated")"#,
        "var ErrX = errors.ErrNotFound",
        r#"return myerrors.Wrap(err, "x")"#,
    ] {
        assert_eq!(rewrite(line), LineOutcome::Untouched, "line: {line}");
    }
}

#[test]
fn test_malformed_lines() {
    for line in [
        r#"return errors.Wrap(err, "Unclosed string literal)"#,
        r#"return errors.Wrapf(err, "multi-line %s","#,
        r#"return errors.Wrap(err, fmt.Sprintf("x %s", y)"#,
    ] {
        assert!(matches!(rewrite(line), LineOutcome::Malformed(_)), "line: {line}");
    }
}
