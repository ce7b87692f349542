use acl::{AclEntry, ArchiveFlags, InheritanceMode, PermissionSet};
use proptest::prelude::*;

fn permission_set() -> impl Strategy<Value = PermissionSet> {
    any::<[bool; 13]>().prop_map(|flags| PermissionSet {
        read_data: flags[0],
        write_data: flags[1],
        execute: flags[2],
        append_data: flags[3],
        delete: flags[4],
        delete_child: flags[5],
        read_attribute: flags[6],
        write_attribute: flags[7],
        read_xattr: flags[8],
        write_xattr: flags[9],
        read_acl: flags[10],
        write_acl: flags[11],
        get_ownership: flags[12],
    })
}

fn inheritance_mode() -> impl Strategy<Value = InheritanceMode> {
    any::<[bool; 4]>().prop_map(|[file, directory, inherit_only, no_propagate]| InheritanceMode {
        file_inherited: file,
        directory_inherited: directory,
        inherit_only,
        no_propagate,
    })
}

fn archive_flags() -> impl Strategy<Value = ArchiveFlags> {
    any::<[bool; 5]>().prop_map(
        |[is_inherit, is_read_only, is_owner_group, has_acl, is_support_acl]| ArchiveFlags {
            is_inherit,
            is_read_only,
            is_owner_group,
            has_acl,
            is_support_acl,
        },
    )
}

fn acl_entry() -> impl Strategy<Value = AclEntry> {
    (
        prop::sample::select(vec!["user", "group", "owner", "everyone", "authenticated_user"]),
        "[a-zA-Z0-9_. -]{1,16}",
        prop::sample::select(vec!["allow", "deny"]),
        permission_set(),
        inheritance_mode(),
    )
        .prop_map(|(role, name, acl_type, permissions, inherit_mode)| {
            AclEntry::new(role, name, acl_type, permissions, inherit_mode)
        })
}

proptest! {
    #[test]
    fn permission_set_survives_text(permissions in permission_set()) {
        let text = permissions.to_string();
        prop_assert_eq!(text.chars().count(), PermissionSet::WIDTH);
        prop_assert_eq!(PermissionSet::parse(&text), Ok(permissions));
    }

    #[test]
    fn inheritance_mode_survives_text(mode in inheritance_mode()) {
        let text = mode.to_string();
        prop_assert_eq!(text.chars().count(), InheritanceMode::WIDTH);
        prop_assert_eq!(InheritanceMode::parse(&text), Ok(mode));
    }

    #[test]
    fn archive_flags_survive_text(flags in archive_flags()) {
        let text = flags.to_string();
        prop_assert_eq!(text == "None", flags.is_none());
        prop_assert_eq!(ArchiveFlags::parse(&text), flags);
    }

    #[test]
    fn entry_survives_text(entry in acl_entry()) {
        let text = entry.to_string();
        prop_assert_eq!(AclEntry::parse(&text), Ok(entry));
    }

    #[test]
    fn permission_format_is_stable(token in "[rwxpdDaARWcCo-]{0,20}") {
        let once = PermissionSet::parse(&token).map(|permissions| permissions.to_string());
        prop_assert!(once.is_ok());
        let once = once.unwrap_or_default();
        let twice = PermissionSet::parse(&once).map(|permissions| permissions.to_string());
        prop_assert_eq!(twice, Ok(once));
    }

    #[test]
    fn archive_difference_never_overlaps(current in archive_flags(), desired in archive_flags()) {
        let to_drop = current.difference(&desired);
        let to_set = desired.difference(&current);
        let overlap = ArchiveFlags {
            is_inherit: to_drop.is_inherit && to_set.is_inherit,
            is_read_only: to_drop.is_read_only && to_set.is_read_only,
            is_owner_group: to_drop.is_owner_group && to_set.is_owner_group,
            has_acl: to_drop.has_acl && to_set.has_acl,
            is_support_acl: to_drop.is_support_acl && to_set.is_support_acl,
        };
        prop_assert!(overlap.is_none());
        prop_assert_eq!(current.difference(&to_drop).union(&to_set), desired);
    }
}
