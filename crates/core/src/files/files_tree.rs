//! Traversals over the parent-id tree.

use std::collections::{HashSet, VecDeque};

use super::files_model::FileItem;

/// Returns `root_id` plus the ids of every item below it.
///
/// Breadth-first and iterative, so depth does not grow the stack. Malformed
/// documents with parent cycles terminate because each id is visited once.
pub fn descendant_ids(files: &[FileItem], root_id: &str) -> HashSet<String> {
    let mut found: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<String> = VecDeque::new();
    found.insert(root_id.to_string());
    queue.push_back(root_id.to_string());

    while let Some(current) = queue.pop_front() {
        for file in files {
            if file.parent_id.as_deref() == Some(current.as_str()) && found.insert(file.id.clone())
            {
                queue.push_back(file.id.clone());
            }
        }
    }
    found
}

/// Direct children of `parent_id` (`None` for the root), folders first then by name.
pub fn children<'a>(files: &'a [FileItem], parent_id: Option<&str>) -> Vec<&'a FileItem> {
    let mut items: Vec<&FileItem> = files
        .iter()
        .filter(|f| f.parent_id.as_deref() == parent_id)
        .collect();
    items.sort_by(|a, b| {
        b.is_folder()
            .cmp(&a.is_folder())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    items
}

/// Path from the root down to `folder_id`, inclusive. Empty for the root or
/// an unknown id.
pub fn breadcrumbs<'a>(files: &'a [FileItem], folder_id: Option<&str>) -> Vec<&'a FileItem> {
    let mut path = Vec::new();
    let mut seen = HashSet::new();
    let mut current = folder_id;
    while let Some(id) = current {
        if !seen.insert(id) {
            break;
        }
        match files.iter().find(|f| f.id == id) {
            Some(item) => {
                path.push(item);
                current = item.parent_id.as_deref();
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::FileType;

    fn item(id: &str, parent: Option<&str>, name: &str, file_type: FileType) -> FileItem {
        FileItem {
            id: id.to_string(),
            parent_id: parent.map(str::to_string),
            name: name.to_string(),
            file_type,
            ..Default::default()
        }
    }

    fn tree() -> Vec<FileItem> {
        vec![
            item("work", None, "Work", FileType::Folder),
            item("clients", Some("work"), "Clients", FileType::Folder),
            item("acme", Some("clients"), "acme.md", FileType::File),
            item("todo", Some("work"), "todo.md", FileType::File),
            item("home", None, "Home", FileType::Folder),
            item("recipes", Some("home"), "recipes.md", FileType::File),
        ]
    }

    #[test]
    fn test_descendants_cover_subtree_only() {
        let ids = descendant_ids(&tree(), "work");
        let mut ids: Vec<_> = ids.into_iter().collect();
        ids.sort();
        assert_eq!(ids, vec!["acme", "clients", "todo", "work"]);
    }

    #[test]
    fn test_descendants_survive_cycles() {
        let files = vec![
            item("a", Some("b"), "a", FileType::Folder),
            item("b", Some("a"), "b", FileType::Folder),
        ];
        assert_eq!(descendant_ids(&files, "a").len(), 2);
    }

    #[test]
    fn test_children_lists_folders_first() {
        let files = tree();
        let names: Vec<&str> = children(&files, Some("work"))
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["Clients", "todo.md"]);
        assert_eq!(children(&files, None).len(), 2);
    }

    #[test]
    fn test_breadcrumbs_walk_to_root() {
        let files = tree();
        let names: Vec<&str> = breadcrumbs(&files, Some("clients"))
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["Work", "Clients"]);
        assert!(breadcrumbs(&files, None).is_empty());
        assert!(breadcrumbs(&files, Some("missing")).is_empty());
    }
}
