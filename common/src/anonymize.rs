//! 匿名化ユーティリティ
//!
//! ノード名やプロジェクト名などの識別情報をそのまま送信しないよう、
//! 決定的なハッシュ値・UUIDに変換する。同じ入力からは常に同じ値が得られる。

use uuid::Uuid;

/// 入力文字列のMD5ダイジェストを小文字16進数で返す
pub fn hash_of(input: &str) -> String {
    format!("{:x}", md5::compute(input.as_bytes()))
}

/// 名前からnil名前空間のMD5ベースUUID（バージョン3）を導出する
///
/// リソース名の代わりにレコードへ書き込む識別子。
pub fn generate_uuid(name: &str) -> String {
    Uuid::new_v3(&Uuid::nil(), name.as_bytes())
        .hyphenated()
        .to_string()
}

/// 空文字列を`None`に変換する
pub fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_of_known_value() {
        assert_eq!(
            hash_of("node-1machine-1system-1"),
            "e0a43c0e12e399294dbe122c83dcd612"
        );
        assert_eq!(hash_of(""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_generate_uuid_is_name_based_v3() {
        assert_eq!(
            generate_uuid("kubermatic"),
            "a564e772-777f-3217-967d-e9321cfac2d4"
        );
        assert_eq!(
            generate_uuid("project-abc"),
            "5440c913-5e7c-34bf-98e1-61380a712102"
        );
    }

    #[test]
    fn test_generate_uuid_is_stable() {
        assert_eq!(generate_uuid("seed-eu"), generate_uuid("seed-eu"));
        assert_ne!(generate_uuid("seed-eu"), generate_uuid("seed-us"));
    }

    #[test]
    fn test_generate_uuid_never_contains_name() {
        let id = generate_uuid("alice@example.com");
        assert!(!id.contains("alice"));
        assert_eq!(Uuid::parse_str(&id).unwrap().get_version_num(), 3);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("linux"), Some("linux".to_string()));
    }
}
