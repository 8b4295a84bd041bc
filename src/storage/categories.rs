//! Category repository for JSON storage
//!
//! Categories are keyed by `(owner, name)`; listing is always sorted
//! lexicographically by name within an owner.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::OutlayError;
use crate::models::Category;

use super::file_io::{read_json, write_json_atomic};

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CategoryData {
    categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    data: RwLock<HashMap<(String, String), Category>>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), OutlayError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for category in file_data.categories {
            data.insert((category.owner.clone(), category.name.clone()), category);
        }

        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut categories: Vec<_> = data.values().cloned().collect();
        categories.sort_by(|a, b| (&a.owner, &a.name).cmp(&(&b.owner, &b.name)));

        let file_data = CategoryData { categories };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a category by owner and name
    pub fn get(&self, owner: &str, name: &str) -> Result<Option<Category>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&(owner.to_string(), name.to_string())).cloned())
    }

    /// List an owner's categories sorted lexicographically by name
    pub fn list_for_owner(&self, owner: &str) -> Result<Vec<Category>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = data
            .values()
            .filter(|c| c.owner == owner)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    /// Insert or replace a category
    pub fn upsert(&self, category: Category) -> Result<(), OutlayError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert((category.owner.clone(), category.name.clone()), category);
        Ok(())
    }

    /// Delete a category; returns whether it was present
    pub fn delete(&self, owner: &str, name: &str) -> Result<bool, OutlayError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&(owner.to_string(), name.to_string())).is_some())
    }

    /// Count all categories across owners
    pub fn count(&self) -> Result<usize, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, CategoryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("categories.json");
        let repo = CategoryRepository::new(path);
        repo.load().unwrap();
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.list_for_owner("alice").unwrap().is_empty());
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();

        repo.upsert(Category::new("alice", "Food")).unwrap();
        assert_eq!(repo.count().unwrap(), 1);

        let found = repo.get("alice", "Food").unwrap().unwrap();
        assert_eq!(found.name, "Food");

        // Same name under a different owner is a distinct category
        assert!(repo.get("bob", "Food").unwrap().is_none());
    }

    #[test]
    fn test_list_sorted_by_name() {
        let (_temp_dir, repo) = create_test_repo();

        repo.upsert(Category::new("alice", "Transport")).unwrap();
        repo.upsert(Category::new("alice", "Food")).unwrap();
        repo.upsert(Category::new("alice", "Rent")).unwrap();
        repo.upsert(Category::new("bob", "Books")).unwrap();

        let names: Vec<_> = repo
            .list_for_owner("alice")
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Food", "Rent", "Transport"]);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();

        repo.upsert(Category::new("alice", "Food")).unwrap();
        assert!(repo.delete("alice", "Food").unwrap());
        assert!(!repo.delete("alice", "Food").unwrap());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();

        repo.upsert(Category::new("alice", "Food")).unwrap();
        repo.save().unwrap();

        let repo2 = CategoryRepository::new(temp_dir.path().join("categories.json"));
        repo2.load().unwrap();
        assert!(repo2.get("alice", "Food").unwrap().is_some());
    }
}
