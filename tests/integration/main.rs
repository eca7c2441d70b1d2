//! Integration tests for Amber

mod repository_tests {
    use amber::{locate_root_from_cwd, AmberError};
    use serial_test::serial;
    use std::env;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Restores the working directory when dropped
    struct CwdGuard(PathBuf);

    impl CwdGuard {
        fn enter(dir: &Path) -> Self {
            let previous = env::current_dir().unwrap();
            env::set_current_dir(dir).unwrap();
            Self(previous)
        }
    }

    impl Drop for CwdGuard {
        fn drop(&mut self) {
            let _ = env::set_current_dir(&self.0);
        }
    }

    fn canonical(path: &Path) -> PathBuf {
        fs::canonicalize(path).unwrap()
    }

    #[test]
    #[serial]
    fn returns_root_when_there() {
        let temp = TempDir::new().unwrap();
        let artifacts = canonical(temp.path()).join("artifacts");
        fs::create_dir_all(artifacts.join(".amber")).unwrap();

        let _cwd = CwdGuard::enter(&artifacts);
        let root = locate_root_from_cwd(".amber").unwrap();

        assert_eq!(root, artifacts.join(".amber"));
    }

    #[test]
    #[serial]
    fn returns_root_when_below() {
        let temp = TempDir::new().unwrap();
        let artifacts = canonical(temp.path()).join("artifacts");
        fs::create_dir_all(artifacts.join(".amber")).unwrap();
        fs::create_dir_all(artifacts.join("foo").join("bar")).unwrap();

        let _cwd = CwdGuard::enter(&artifacts.join("foo").join("bar"));
        let root = locate_root_from_cwd(".amber").unwrap();

        assert_eq!(root, artifacts.join(".amber"));
    }

    #[test]
    #[serial]
    fn errors_when_marker_is_file() {
        let temp = TempDir::new().unwrap();
        let artifacts = canonical(temp.path()).join("artifacts");
        fs::create_dir_all(artifacts.join("foo").join("bar")).unwrap();
        fs::write(artifacts.join(".amber"), b"").unwrap();

        let _cwd = CwdGuard::enter(&artifacts.join("foo").join("bar"));
        let err = locate_root_from_cwd(".amber").unwrap_err();

        assert!(matches!(err, AmberError::RepositoryConflict { .. }));
        assert!(err.is_no_repository());
    }

    #[test]
    #[serial]
    fn errors_when_not_found() {
        let temp = TempDir::new().unwrap();
        let nested = canonical(temp.path()).join("artifacts").join("foo").join("bar");
        fs::create_dir_all(&nested).unwrap();

        let _cwd = CwdGuard::enter(&nested);
        let err = locate_root_from_cwd(".amber-should-never-see").unwrap_err();

        assert!(matches!(err, AmberError::NoRepository { .. }));
        assert!(err.to_string().contains(".amber-should-never-see"));
    }
}

mod artifact_tests {
    use amber::artifact;
    use amber::config::ConfigManager;
    use amber::{parse_header, parse_uri_list, select_iv, Metadata, Repository};
    use std::fs;
    use tempfile::TempDir;

    const KEY: &[u8; 32] = b"0123456789abcdef0123456789abcdef";

    #[tokio::test]
    async fn store_and_recover_through_repository() {
        let temp = TempDir::new().unwrap();
        let marker = temp.path().join(".amber");
        fs::create_dir(&marker).unwrap();
        fs::write(
            marker.join("config.toml"),
            "[defaults]\nhash = \"sha256\"\nencryption = \"aes256\"\n",
        )
        .unwrap();
        let workdir = temp.path().join("src").join("module");
        fs::create_dir_all(&workdir).unwrap();

        let repository = Repository::discover(".amber", &workdir).unwrap();
        let config = ConfigManager::with_path(temp.path().join("user.toml"))
            .load_for_repository(&repository)
            .await
            .unwrap();

        let payload = b"tarball bytes \x00\xff fetched from a mirror".to_vec();
        let metadata = Metadata::default().with_defaults(&config.defaults);
        let sealed = artifact::seal(&payload, &metadata, KEY).unwrap();

        let stored = repository.root().join("artifact");
        fs::write(&stored, &sealed).unwrap();
        let blob = fs::read(&stored).unwrap();

        let header = parse_header(&blob).unwrap();
        assert_eq!(header.hash_name, "sha256");
        assert_eq!(header.encryption_name, "aes256");

        let recovered = artifact::open(&blob, KEY, &config.defaults).unwrap();
        assert_eq!(recovered, payload);
    }

    #[test]
    fn iv_vectors_match_published_values() {
        let plaintext =
            b"this is our blob of plaintext, and its size will be hashed to come up with an iv.";
        let iv = select_iv("aes128", "sha1", plaintext).unwrap();
        assert_eq!(hex::encode(iv), "31643531336330626362653333623265");
    }

    #[test]
    fn source_list_preserves_priority() {
        let list = "# primary mirror\r\nhttps://a.example/pkg.tgz\r\n\r\n# fallback\r\nhttps://b.example/pkg.tgz\r\n";
        assert_eq!(
            parse_uri_list(list),
            vec!["https://a.example/pkg.tgz", "https://b.example/pkg.tgz"]
        );
    }
}
