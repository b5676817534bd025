// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

#[cfg(test)]
mod tests {
    use cephctl_lib::build;
    use cephctl_lib::error::{ParamPath, ValidationError};
    use cephctl_lib::schema::{Args, Value};

    fn pool_create(pg_num: impl Into<Value>) -> Args {
        Args::new()
            .set("pool", "rbd")
            .set("pg_num", pg_num)
            .set("pgp_num", 32)
    }

    #[test]
    fn range_error_below_lower_bound() {
        let err = build("osd.pool.create", &pool_create(-1)).unwrap_err();
        match err {
            ValidationError::Range { param, value, .. } => {
                assert_eq!(param, ParamPath::new("pg_num"));
                assert_eq!(value, "-1");
            }
            other => panic!("expected a range error, got {other:?}"),
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        build("osd.pool.create", &pool_create(0)).unwrap();

        let args = Args::new().set("name", "osd.3").set("weight", 0.0);
        build("osd.crush.reweight", &args).unwrap();
        let args = Args::new().set("name", "osd.3").set("weight", -0.5);
        assert!(matches!(
            build("osd.crush.reweight", &args),
            Err(ValidationError::Range { .. })
        ));
    }

    #[test]
    fn type_is_checked_before_range() {
        let err = build("osd.pool.create", &pool_create("-1")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TypeMismatch {
                param: ParamPath::new("pg_num"),
                expected: "an integer",
                found: "string",
            }
        );
    }

    #[test]
    fn integer_is_accepted_for_float() {
        let args = Args::new().set("name", "osd.3").set("weight", 2);
        let command = build("osd.crush.reweight", &args).unwrap();
        assert_eq!(command.get("weight"), Some(&Value::Float(2.0)));
    }

    #[test]
    fn infinite_weight_is_out_of_range() {
        for weight in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let args = Args::new().set("name", "osd.3").set("weight", weight);
            match build("osd.crush.reweight", &args) {
                Err(ValidationError::Range { param, .. }) => {
                    assert_eq!(param, ParamPath::new("weight"));
                }
                other => panic!("{weight} should be out of range, got {other:?}"),
            }
        }
    }

    #[test]
    fn choices_are_case_sensitive() {
        build("osd.set", &Args::new().set("key", "full")).unwrap();

        for bad in ["bogus", "FULL", " full", ""] {
            match build("osd.set", &Args::new().set("key", bad)) {
                Err(ValidationError::InvalidChoice { param, value, .. }) => {
                    assert_eq!(param.name, "key");
                    assert_eq!(value, bad);
                }
                other => panic!("'{bad}' should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn unset_only_accepts_removable_flags() {
        build("osd.unset", &Args::new().set("key", "noout")).unwrap();
        assert!(matches!(
            build("osd.unset", &Args::new().set("key", "pglog_hardlimit")),
            Err(ValidationError::InvalidChoice { .. })
        ));
    }

    #[test]
    fn list_error_names_the_element() {
        let args = Args::new()
            .set("pool", "rbd")
            .set("image", "disk")
            .set("features", vec!["layering", "bogus", "journaling"]);
        match build("rbd.feature.enable", &args) {
            Err(ValidationError::InvalidChoice { param, value, .. }) => {
                assert_eq!(param, ParamPath::new("features").element(1));
                assert_eq!(value, "bogus");
            }
            other => panic!("expected an invalid choice, got {other:?}"),
        }
    }

    #[test]
    fn list_must_be_a_list() {
        let args = Args::new().set("ids", "osd.1");
        assert!(matches!(
            build("osd.out", &args),
            Err(ValidationError::TypeMismatch { found: "string", .. })
        ));
    }

    #[test]
    fn osd_selectors() {
        let ok = Args::new().set("ids", vec!["osd.1", "2", "any", "all"]);
        build("osd.out", &ok).unwrap();

        for bad in ["osd.", "osd.x", "mon.a", "-1", "+1"] {
            let args = Args::new().set("ids", vec![bad]);
            assert!(
                matches!(build("osd.out", &args), Err(ValidationError::Format { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn entity_names() {
        for good in ["client.admin", "osd.0", "mgr.x", "client.rbd-mirror"] {
            build("auth.del", &Args::new().set("entity", good)).unwrap();
        }
        for bad in ["admin", "client.", "bogus.admin", "osd.a"] {
            assert!(
                matches!(
                    build("auth.del", &Args::new().set("entity", bad)),
                    Err(ValidationError::Format { .. })
                ),
                "{bad}"
            );
        }
    }

    #[test]
    fn pgids() {
        build("pg.scrub", &Args::new().set("pgid", "1.2f")).unwrap();
        for bad in ["1", "a.1", "1.", "1.xyz"] {
            assert!(
                matches!(
                    build("pg.scrub", &Args::new().set("pgid", bad)),
                    Err(ValidationError::Format { .. })
                ),
                "{bad}"
            );
        }
    }

    #[test]
    fn image_names_reject_spec_separators() {
        for bad in ["a/b", "a@b", "-rf", "", "a b", "disk;reboot", "$(reboot)"] {
            let args = Args::new().set("pool", "rbd").set("image", bad);
            assert!(
                matches!(build("rbd.info", &args), Err(ValidationError::Format { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn charset_whitelist() {
        let args = Args::new().set("name", "ssd-rule_1.a");
        assert!(build("osd.crush.rule.rm", &args).is_ok());

        let args = Args::new().set("name", "ssd rule");
        assert!(matches!(
            build("osd.crush.rule.rm", &args),
            Err(ValidationError::Format { .. })
        ));
    }
}
